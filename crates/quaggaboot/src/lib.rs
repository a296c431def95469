//! Boot orchestrator for the Quagga routing daemons.
//!
//! A single invocation, `quaggaboot zebra`, brings up the whole routing
//! suite described by one integrated configuration file:
//!
//! - the legacy `/etc/quagga` layout is pointed at the active configuration
//!   (see [`compat`]);
//! - `zebra` is started and must succeed;
//! - each protocol daemon whose `router <protocol>` statement appears in the
//!   configuration is started, in a fixed order, with failures reported but
//!   tolerated;
//! - `vtysh -b` applies the configuration to the running set.
//!
//! The orchestration is fire-once. Nothing is supervised or retried after
//! the pass ends; a daemon that failed to start stays absent until the next
//! boot. Two concurrent invocations against the same state directory are not
//! guarded against.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use quaggaboot_config::Config;

pub mod catalog;
pub mod compat;
mod control;
mod errors;
mod identity;
mod inspector;
mod launcher;
mod orchestrator;
mod readiness;
mod reporter;
mod resolver;
pub mod telemetry;

pub use catalog::{DaemonGate, DaemonSpec, MANDATORY_DAEMON, OPTIONAL_DAEMONS};
pub use compat::{CompatFilesystem, CompatLink, HostFilesystem};
pub use control::{CommitStatus, ControlClient, VtyshClient};
pub use errors::BootError;
pub use identity::{ServiceIdentity, SystemIdentity};
pub use inspector::{ConfigInspector, ConfigUnavailableError};
pub use launcher::{DaemonLauncher, LaunchResult, ProcessLauncher};
pub use orchestrator::{BootPlan, BootSummary, HostPorts, ProcessPorts, run_boot, run_boot_with};
pub use readiness::{Readiness, ReadinessProbe, SocketProbe};
pub use reporter::{BootReporter, StructuredBootReporter};
pub use resolver::{ProgramResolver, ResolutionError, SearchPathResolver, resolve};
pub use telemetry::{TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader {
    /// Loads the runtime configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that layers defaults, configuration file and environment.
///
/// Only the program name is handed to the loader; the positional service
/// argument is validated separately and never parsed as a setting.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))])
    }
}

/// Errors that end an invocation with a failure status.
#[derive(Debug, Error)]
pub enum AppError {
    /// The service argument named something other than the core daemon.
    #[error("WARNING: '{given}': all Quagga daemons are launched by the 'zebra' service!")]
    Argument {
        /// Argument that was supplied.
        given: String,
    },
    /// The command line could not be parsed.
    #[error("{0}")]
    Usage(clap::Error),
    /// Runtime configuration failed to load.
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<OrthoError>),
    /// Logging could not be initialised.
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    /// The boot pass stopped on a fatal error.
    #[error("ERROR: {0}")]
    Boot(#[from] BootError),
}

#[derive(Debug, Parser)]
#[command(
    name = "quaggaboot",
    about = "Starts zebra and the routing daemons enabled by the integrated configuration"
)]
struct Cli {
    /// Service being booted; only `zebra` triggers the boot.
    service: String,
}

/// Runs the orchestrator against the host using the provided arguments.
#[must_use]
pub fn run<I, E>(args: I, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    E: Write,
{
    run_with(args, stderr, &SystemConfigLoader, |config| {
        compat::apply_legacy_links(config, &HostFilesystem);
        run_boot(config)
    })
}

/// Runs the entry point with an injected loader and boot sequence.
///
/// The argument is checked before anything else so a rejected invocation has
/// no side effects.
pub fn run_with<I, E, L, B>(args: I, stderr: &mut E, loader: &L, boot: B) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    E: Write,
    L: ConfigLoader,
    B: FnOnce(&Config) -> Result<BootSummary, BootError>,
{
    let result = validate_invocation(args)
        .and_then(|()| loader.load().map_err(AppError::LoadConfiguration))
        .and_then(|config| {
            telemetry::initialise(&config)?;
            boot(&config).map_err(AppError::from)
        });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(AppError::Usage(error)) if !error.use_stderr() => {
            let _ = write!(stderr, "{error}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn validate_invocation<I>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = Cli::try_parse_from(args).map_err(AppError::Usage)?;
    if cli.service == MANDATORY_DAEMON {
        Ok(())
    } else {
        Err(AppError::Argument {
            given: cli.service,
        })
    }
}

#[cfg(test)]
mod tests;
