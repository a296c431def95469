//! Structured reporting for boot lifecycle events.

use std::io;
use std::time::Duration;

use camino::Utf8Path;
use quaggaboot_config::Config;

use crate::control::CommitStatus;
use crate::errors::BootError;
use crate::launcher::LaunchResult;
use crate::orchestrator::BootSummary;
use crate::resolver::ResolutionError;

const BOOT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::boot");

/// Observer trait used to surface boot events to telemetry sinks.
pub trait BootReporter: Send + Sync {
    /// Invoked before the configuration is inspected.
    fn boot_starting(&self, config: &Config);

    /// Invoked after the state directory was handed to the service user.
    fn ownership_adjusted(&self, directory: &Utf8Path, user: &str);

    /// Invoked when the service user does not exist.
    fn ownership_skipped(&self, user: &str);

    /// Invoked when changing the state directory owner failed.
    fn ownership_failed(&self, directory: &Utf8Path, user: &str, error: &io::Error);

    /// Invoked before a daemon launch command runs.
    fn daemon_starting(&self, daemon: &str, flags: &[&str]);

    /// Invoked after a daemon launched successfully.
    fn daemon_ready(&self, result: &LaunchResult);

    /// Invoked when a daemon launch command failed.
    fn daemon_failed(&self, result: &LaunchResult);

    /// Invoked when an optional daemon could not be found.
    fn daemon_unresolved(&self, error: &ResolutionError);

    /// Invoked for catalogued daemons the configuration does not enable.
    fn daemon_disabled(&self, daemon: &str);

    /// Invoked when zebra's socket did not answer in time.
    fn readiness_timed_out(&self, socket: &Utf8Path, timeout: Duration);

    /// Invoked after the control client ran.
    fn configuration_committed(&self, client: &str, status: CommitStatus);

    /// Invoked when the control client could not be executed.
    fn commit_failed(&self, client: &str, error: &io::Error);

    /// Invoked once every step has run.
    fn boot_completed(&self, summary: &BootSummary);

    /// Invoked when a fatal error stopped the boot.
    fn boot_failed(&self, error: &BootError);
}

/// Default reporter that records boot events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredBootReporter;

impl StructuredBootReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BootReporter for StructuredBootReporter {
    fn boot_starting(&self, config: &Config) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "boot_starting",
            conf = %config.conf_path(),
            sbin_search = %config.sbin_search(),
            bin_search = %config.bin_search(),
            state_dir = %config.state_dir(),
            "starting routing daemon boot"
        );
    }

    fn ownership_adjusted(&self, directory: &Utf8Path, user: &str) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "ownership_adjusted",
            directory = %directory,
            user,
            "state directory handed to service user"
        );
    }

    fn ownership_skipped(&self, user: &str) {
        tracing::debug!(
            target: BOOT_TARGET,
            event = "ownership_skipped",
            user,
            "service user not found; leaving state directory owner unchanged"
        );
    }

    fn ownership_failed(&self, directory: &Utf8Path, user: &str, error: &io::Error) {
        tracing::warn!(
            target: BOOT_TARGET,
            event = "ownership_failed",
            directory = %directory,
            user,
            %error,
            "failed to change state directory owner"
        );
    }

    fn daemon_starting(&self, daemon: &str, flags: &[&str]) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "daemon_starting",
            daemon,
            ?flags,
            "starting daemon"
        );
    }

    fn daemon_ready(&self, result: &LaunchResult) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "daemon_ready",
            daemon = %result.daemon,
            "daemon started"
        );
    }

    fn daemon_failed(&self, result: &LaunchResult) {
        tracing::error!(
            target: BOOT_TARGET,
            event = "daemon_failed",
            daemon = %result.daemon,
            message = %result.message(),
            "daemon failed to start"
        );
    }

    fn daemon_unresolved(&self, error: &ResolutionError) {
        tracing::error!(
            target: BOOT_TARGET,
            event = "daemon_unresolved",
            daemon = %error.program,
            search = %error.search,
            "daemon not found in search path"
        );
    }

    fn daemon_disabled(&self, daemon: &str) {
        tracing::debug!(
            target: BOOT_TARGET,
            event = "daemon_disabled",
            daemon,
            "daemon not enabled by configuration"
        );
    }

    fn readiness_timed_out(&self, socket: &Utf8Path, timeout: Duration) {
        tracing::warn!(
            target: BOOT_TARGET,
            event = "readiness_timed_out",
            socket = %socket,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "zebra socket did not answer; starting protocol daemons anyway"
        );
    }

    fn configuration_committed(&self, client: &str, status: CommitStatus) {
        match status {
            CommitStatus::Applied => tracing::info!(
                target: BOOT_TARGET,
                event = "configuration_committed",
                client,
                "configuration applied"
            ),
            CommitStatus::Rejected { code } => tracing::warn!(
                target: BOOT_TARGET,
                event = "configuration_committed",
                client,
                ?code,
                "control client reported a failure"
            ),
        }
    }

    fn commit_failed(&self, client: &str, error: &io::Error) {
        tracing::warn!(
            target: BOOT_TARGET,
            event = "commit_failed",
            client,
            %error,
            "failed to run control client"
        );
    }

    fn boot_completed(&self, summary: &BootSummary) {
        tracing::info!(
            target: BOOT_TARGET,
            event = "boot_completed",
            launched = ?summary.launched,
            failed = ?summary.failed,
            "routing daemon boot completed"
        );
    }

    fn boot_failed(&self, error: &BootError) {
        tracing::error!(
            target: BOOT_TARGET,
            event = "boot_failed",
            %error,
            "routing daemon boot failed"
        );
    }
}
