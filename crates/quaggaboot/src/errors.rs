//! Defines the error surface for a boot pass.

use thiserror::Error;

use crate::inspector::ConfigUnavailableError;
use crate::resolver::ResolutionError;

/// Fatal conditions that stop a boot pass.
#[derive(Debug, Error)]
pub enum BootError {
    /// The routing configuration could not be read, so no daemon can be
    /// selected safely.
    #[error("routing configuration unavailable: {source}")]
    ConfigUnavailable {
        /// Underlying read failure.
        #[from]
        source: ConfigUnavailableError,
    },
    /// The mandatory daemon is not installed on the search path.
    #[error("mandatory daemon unavailable: {source}")]
    MandatoryUnresolved {
        /// Underlying lookup failure.
        #[source]
        source: ResolutionError,
    },
    /// The mandatory daemon's launch command failed.
    #[error("{diagnostic}")]
    MandatoryLaunch {
        /// Daemon that failed.
        daemon: String,
        /// Launch diagnostic.
        diagnostic: String,
    },
    /// The control client is not installed on the search path.
    #[error("control client unavailable: {source}")]
    ControlClientUnresolved {
        /// Underlying lookup failure.
        #[source]
        source: ResolutionError,
    },
}
