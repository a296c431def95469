//! Runs the control client that commits the integrated configuration.

use std::io;
use std::process::{Command, Stdio};

use camino::Utf8Path;

use crate::catalog::COMMIT_FLAG;

/// Exit state reported by the control client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The client exited successfully.
    Applied,
    /// The client exited with a failure status; `None` when killed by a signal.
    Rejected {
        /// Exit code, when one was reported.
        code: Option<i32>,
    },
}

/// Applies the configuration to the running daemons.
pub trait ControlClient: Send + Sync {
    /// Runs `directory/program` in apply-everything mode and waits for it.
    fn commit(&self, directory: &Utf8Path, program: &str) -> io::Result<CommitStatus>;
}

/// Client that executes `vtysh -b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VtyshClient;

impl ControlClient for VtyshClient {
    fn commit(&self, directory: &Utf8Path, program: &str) -> io::Result<CommitStatus> {
        let status = Command::new(directory.join(program).as_std_path())
            .arg(COMMIT_FLAG)
            .stdin(Stdio::null())
            .status()?;
        if status.success() {
            Ok(CommitStatus::Applied)
        } else {
            Ok(CommitStatus::Rejected {
                code: status.code(),
            })
        }
    }
}
