//! Test double for [`BootReporter`] that records structured events for assertions.

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use quaggaboot_config::Config;

use crate::{BootError, BootReporter, BootSummary, CommitStatus, LaunchResult, ResolutionError};

/// Structured boot events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootEvent {
    BootStarting,
    OwnershipAdjusted { directory: Utf8PathBuf, user: String },
    OwnershipSkipped(String),
    OwnershipFailed(String),
    DaemonStarting { daemon: String, flags: Vec<String> },
    DaemonReady(String),
    DaemonFailed { daemon: String, message: String },
    DaemonUnresolved(String),
    DaemonDisabled(String),
    ReadinessTimedOut { socket: Utf8PathBuf, timeout: Duration },
    ConfigurationCommitted(CommitStatus),
    CommitFailed(String),
    BootCompleted(BootSummary),
    BootFailed(String),
}

/// Records boot events for assertions.
#[derive(Debug, Default)]
pub struct RecordingBootReporter {
    events: Mutex<Vec<BootEvent>>,
}

impl RecordingBootReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<BootEvent> {
        self.events
            .lock()
            .expect("boot reporter mutex poisoned")
            .clone()
    }

    /// Position of the first event equal to `event`.
    pub fn position(&self, event: &BootEvent) -> Option<usize> {
        self.events().iter().position(|recorded| recorded == event)
    }

    fn record(&self, event: BootEvent) {
        self.events
            .lock()
            .expect("boot reporter mutex poisoned")
            .push(event);
    }
}

impl BootReporter for RecordingBootReporter {
    fn boot_starting(&self, _config: &Config) {
        self.record(BootEvent::BootStarting);
    }

    fn ownership_adjusted(&self, directory: &Utf8Path, user: &str) {
        self.record(BootEvent::OwnershipAdjusted {
            directory: directory.to_path_buf(),
            user: user.to_owned(),
        });
    }

    fn ownership_skipped(&self, user: &str) {
        self.record(BootEvent::OwnershipSkipped(user.to_owned()));
    }

    fn ownership_failed(&self, _directory: &Utf8Path, _user: &str, error: &io::Error) {
        self.record(BootEvent::OwnershipFailed(error.to_string()));
    }

    fn daemon_starting(&self, daemon: &str, flags: &[&str]) {
        self.record(BootEvent::DaemonStarting {
            daemon: daemon.to_owned(),
            flags: flags.iter().map(|flag| (*flag).to_owned()).collect(),
        });
    }

    fn daemon_ready(&self, result: &LaunchResult) {
        self.record(BootEvent::DaemonReady(result.daemon.clone()));
    }

    fn daemon_failed(&self, result: &LaunchResult) {
        self.record(BootEvent::DaemonFailed {
            daemon: result.daemon.clone(),
            message: result.message().to_owned(),
        });
    }

    fn daemon_unresolved(&self, error: &ResolutionError) {
        self.record(BootEvent::DaemonUnresolved(error.program.clone()));
    }

    fn daemon_disabled(&self, daemon: &str) {
        self.record(BootEvent::DaemonDisabled(daemon.to_owned()));
    }

    fn readiness_timed_out(&self, socket: &Utf8Path, timeout: Duration) {
        self.record(BootEvent::ReadinessTimedOut {
            socket: socket.to_path_buf(),
            timeout,
        });
    }

    fn configuration_committed(&self, _client: &str, status: CommitStatus) {
        self.record(BootEvent::ConfigurationCommitted(status));
    }

    fn commit_failed(&self, client: &str, _error: &io::Error) {
        self.record(BootEvent::CommitFailed(client.to_owned()));
    }

    fn boot_completed(&self, summary: &BootSummary) {
        self.record(BootEvent::BootCompleted(summary.clone()));
    }

    fn boot_failed(&self, error: &BootError) {
        self.record(BootEvent::BootFailed(error.to_string()));
    }
}
