//! Starts routing daemons in daemon mode.

use std::process::{Command, Stdio};

use camino::Utf8Path;
use tracing::debug;

use crate::catalog::DAEMON_MODE_FLAG;

const LAUNCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::launch");

/// Outcome of a single daemon launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchResult {
    /// Daemon that was launched.
    pub daemon: String,
    /// Whether the launch command reported success.
    pub succeeded: bool,
    /// Explanation attached to failures.
    pub diagnostic: Option<String>,
}

impl LaunchResult {
    /// Records a successful launch.
    pub fn success(daemon: impl Into<String>) -> Self {
        Self {
            daemon: daemon.into(),
            succeeded: true,
            diagnostic: None,
        }
    }

    /// Records a failed launch with its diagnostic.
    pub fn failure(daemon: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            daemon: daemon.into(),
            succeeded: false,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Diagnostic text, or an empty string for successful launches.
    #[must_use]
    pub fn message(&self) -> &str {
        self.diagnostic.as_deref().unwrap_or_default()
    }
}

/// Starts a daemon found in a resolved directory.
pub trait DaemonLauncher: Send + Sync {
    /// Runs `directory/daemon` with `flags` followed by the daemon-mode flag.
    fn launch(&self, directory: &Utf8Path, daemon: &str, flags: &[&str]) -> LaunchResult;
}

/// Launcher that executes the daemon binary and waits for it to detach.
///
/// A zero exit status from the launch command is taken as readiness: the
/// daemon forks into the background and the foreground process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl DaemonLauncher for ProcessLauncher {
    fn launch(&self, directory: &Utf8Path, daemon: &str, flags: &[&str]) -> LaunchResult {
        let program = directory.join(daemon);
        debug!(
            target: LAUNCH_TARGET,
            program = %program,
            ?flags,
            "running daemon launch command"
        );
        let status = Command::new(program.as_std_path())
            .args(flags)
            .arg(DAEMON_MODE_FLAG)
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => LaunchResult::success(daemon),
            Ok(status) => LaunchResult::failure(
                daemon,
                format!("Quagga's '{daemon}' daemon failed to start ({status})"),
            ),
            Err(error) => {
                LaunchResult::failure(daemon, format!("failed to execute '{program}': {error}"))
            }
        }
    }
}
