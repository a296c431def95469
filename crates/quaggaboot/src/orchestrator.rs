//! Sequences a single boot pass of the routing daemons.
//!
//! The pass runs strictly in order:
//!
//! 1. read the routing configuration, failing closed when it is unavailable;
//! 2. hand the state directory to the service user when that user exists;
//! 3. start `zebra`, aborting the pass if it cannot be found or started;
//! 4. wait for zebra's API socket;
//! 5. start each enabled optional daemon in catalog order, tolerating
//!    individual failures;
//! 6. resolve the control client, failing the pass when it is missing, and
//!    run it once to apply the configuration.
//!
//! Every host interaction goes through an injected collaborator so the
//! decision logic runs unchanged under test doubles.

use std::sync::Arc;

use quaggaboot_config::{Config, SearchPath};

use crate::catalog::{CONTROL_CLIENT, DaemonSpec, MANDATORY_DAEMON, OPTIONAL_DAEMONS};
use crate::control::{ControlClient, VtyshClient};
use crate::errors::BootError;
use crate::identity::{ServiceIdentity, SystemIdentity};
use crate::inspector::ConfigInspector;
use crate::launcher::{DaemonLauncher, ProcessLauncher};
use crate::readiness::{Readiness, ReadinessProbe, SocketProbe};
use crate::reporter::{BootReporter, StructuredBootReporter};
use crate::resolver::{ProgramResolver, SearchPathResolver};

/// Daemons started during a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootSummary {
    /// Daemons whose launch command succeeded, mandatory daemon first.
    pub launched: Vec<String>,
    /// Enabled optional daemons that could not be found or started.
    pub failed: Vec<String>,
}

/// Collaborators that locate and run programs.
pub struct ProcessPorts<R, L, C> {
    /// Finds executables on the search paths.
    pub resolver: R,
    /// Starts daemons.
    pub launcher: L,
    /// Runs the control client.
    pub client: C,
}

/// Collaborators that touch host state other than processes.
pub struct HostPorts<I, P> {
    /// Service account lookup and ownership changes.
    pub identity: I,
    /// Readiness wait for the mandatory daemon.
    pub readiness: P,
}

/// Everything a boot pass needs besides its configuration.
pub struct BootPlan<R, L, C, I, P> {
    /// Process-level collaborators.
    pub processes: ProcessPorts<R, L, C>,
    /// Host-level collaborators.
    pub host: HostPorts<I, P>,
    /// Observer notified of every boot event.
    pub reporter: Arc<dyn BootReporter>,
}

/// Runs a boot pass against the host.
pub fn run_boot(config: &Config) -> Result<BootSummary, BootError> {
    let plan = BootPlan {
        processes: ProcessPorts {
            resolver: SearchPathResolver,
            launcher: ProcessLauncher,
            client: VtyshClient,
        },
        host: HostPorts {
            identity: SystemIdentity,
            readiness: SocketProbe::new(),
        },
        reporter: Arc::new(StructuredBootReporter::new()),
    };
    run_boot_with(config, plan)
}

/// Runs a boot pass with injected collaborators.
pub fn run_boot_with<R, L, C, I, P>(
    config: &Config,
    plan: BootPlan<R, L, C, I, P>,
) -> Result<BootSummary, BootError>
where
    R: ProgramResolver,
    L: DaemonLauncher,
    C: ControlClient,
    I: ServiceIdentity,
    P: ReadinessProbe,
{
    let BootPlan {
        processes,
        host,
        reporter,
    } = plan;
    reporter.boot_starting(config);

    let orchestrator = BootOrchestrator {
        config,
        processes,
        host,
        reporter: reporter.as_ref(),
    };
    match orchestrator.boot() {
        Ok(summary) => {
            reporter.boot_completed(&summary);
            Ok(summary)
        }
        Err(error) => {
            reporter.boot_failed(&error);
            Err(error)
        }
    }
}

struct BootOrchestrator<'a, R, L, C, I, P> {
    config: &'a Config,
    processes: ProcessPorts<R, L, C>,
    host: HostPorts<I, P>,
    reporter: &'a dyn BootReporter,
}

impl<R, L, C, I, P> BootOrchestrator<'_, R, L, C, I, P>
where
    R: ProgramResolver,
    L: DaemonLauncher,
    C: ControlClient,
    I: ServiceIdentity,
    P: ReadinessProbe,
{
    fn boot(&self) -> Result<BootSummary, BootError> {
        let inspector = ConfigInspector::load(self.config.conf_path())?;
        self.fix_state_ownership();
        let mut summary = BootSummary::default();
        self.start_mandatory()?;
        summary.launched.push(MANDATORY_DAEMON.to_owned());
        self.await_mandatory();
        self.start_optional(&inspector, &mut summary);
        self.commit()?;
        Ok(summary)
    }

    fn fix_state_ownership(&self) {
        let user = self.config.service_user();
        let Some(uid) = self.host.identity.lookup_uid(user) else {
            self.reporter.ownership_skipped(user);
            return;
        };
        let directory = self.config.state_dir();
        match self.host.identity.chown(directory, uid) {
            Ok(()) => self.reporter.ownership_adjusted(directory, user),
            Err(error) => self.reporter.ownership_failed(directory, user, &error),
        }
    }

    fn start_mandatory(&self) -> Result<(), BootError> {
        let directory = self
            .processes
            .resolver
            .resolve(MANDATORY_DAEMON, &self.config.sbin_search())
            .map_err(|source| BootError::MandatoryUnresolved { source })?;
        self.reporter.daemon_starting(MANDATORY_DAEMON, &[]);
        let result = self
            .processes
            .launcher
            .launch(&directory, MANDATORY_DAEMON, &[]);
        if result.succeeded {
            self.reporter.daemon_ready(&result);
            Ok(())
        } else {
            self.reporter.daemon_failed(&result);
            Err(BootError::MandatoryLaunch {
                diagnostic: result.message().to_owned(),
                daemon: result.daemon,
            })
        }
    }

    fn await_mandatory(&self) {
        let socket = self.config.zebra_socket();
        let timeout = self.config.startup_timeout();
        if self.host.readiness.wait_ready(&socket, timeout) == Readiness::TimedOut {
            self.reporter.readiness_timed_out(&socket, timeout);
        }
    }

    fn start_optional(&self, inspector: &ConfigInspector, summary: &mut BootSummary) {
        let search = self.config.sbin_search();
        for spec in OPTIONAL_DAEMONS {
            if !spec.is_enabled(inspector) {
                self.reporter.daemon_disabled(spec.name());
                continue;
            }
            if self.start_optional_daemon(spec, inspector, &search) {
                summary.launched.push(spec.name().to_owned());
            } else {
                summary.failed.push(spec.name().to_owned());
            }
        }
    }

    fn start_optional_daemon(
        &self,
        spec: DaemonSpec,
        inspector: &ConfigInspector,
        search: &SearchPath,
    ) -> bool {
        let directory = match self.processes.resolver.resolve(spec.name(), search) {
            Ok(directory) => directory,
            Err(error) => {
                self.reporter.daemon_unresolved(&error);
                return false;
            }
        };
        let flags = spec.flags(inspector);
        self.reporter.daemon_starting(spec.name(), &flags);
        let result = self
            .processes
            .launcher
            .launch(&directory, spec.name(), &flags);
        if result.succeeded {
            self.reporter.daemon_ready(&result);
        } else {
            self.reporter.daemon_failed(&result);
        }
        result.succeeded
    }

    fn commit(&self) -> Result<(), BootError> {
        let directory = self
            .processes
            .resolver
            .resolve(CONTROL_CLIENT, &self.config.bin_search())
            .map_err(|source| BootError::ControlClientUnresolved { source })?;
        match self.processes.client.commit(&directory, CONTROL_CLIENT) {
            Ok(status) => self.reporter.configuration_committed(CONTROL_CLIENT, status),
            Err(error) => self.reporter.commit_failed(CONTROL_CLIENT, &error),
        }
        Ok(())
    }
}
