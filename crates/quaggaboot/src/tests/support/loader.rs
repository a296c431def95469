//! Configuration loaders for entry point scenarios.

use std::ffi::OsString;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ortho_config::{OrthoConfig, OrthoError};
use quaggaboot_config::Config;

use crate::ConfigLoader;

/// Loader that returns a fixed configuration and counts invocations.
#[derive(Debug, Default)]
pub struct RecordingConfigLoader {
    config: Config,
    calls: AtomicUsize,
}

impl RecordingConfigLoader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the loader ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConfigLoader for RecordingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.clone())
    }
}

/// Loader that fails by passing a malformed timeout on the command line.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_iter([
            OsString::from("quaggaboot"),
            OsString::from("--startup-timeout-ms"),
            OsString::from("soon"),
        ])
    }
}
