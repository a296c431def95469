//! Runtime configuration for the Quagga boot orchestrator.
//!
//! Settings are layered by `ortho_config`: built-in defaults, an optional
//! configuration file, `QUAGGABOOT_*` environment variables and command-line
//! flags. Every field is optional in the loaded [`Config`]; accessors apply
//! the defaults from [`defaults`] so callers never see an unset value.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub mod defaults;
mod logging;
mod search;

pub use defaults::{
    DEFAULT_BIN_SEARCH, DEFAULT_CONF_PATH, DEFAULT_LEGACY_CONF_DIR, DEFAULT_LOG_FILTER,
    DEFAULT_SBIN_SEARCH, DEFAULT_SERVICE_USER, DEFAULT_STARTUP_TIMEOUT,
    DEFAULT_STARTUP_TIMEOUT_MS, DEFAULT_STATE_DIR, ZEBRA_SOCKET_NAME, default_log_filter,
    default_log_format,
};
use defaults::{default_conf_path, default_legacy_conf_dir, default_state_dir};
pub use logging::LogFormat;
pub use search::SearchPath;

/// Settings consumed by a single boot pass.
///
/// The loader seeds every field that has a fixed default, so a host with the
/// stock layout boots without any file, variable or flag. The socket has no
/// seeded value because it follows `state_dir`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QUAGGABOOT")]
pub struct Config {
    /// Routing configuration file inspected for enabled protocols.
    #[ortho_config(default = default_conf_path())]
    pub conf_path: Option<Utf8PathBuf>,
    /// Directories searched for the routing daemons.
    #[ortho_config(default = String::from(DEFAULT_SBIN_SEARCH))]
    pub sbin_search: Option<String>,
    /// Directories searched for the `vtysh` control client.
    #[ortho_config(default = String::from(DEFAULT_BIN_SEARCH))]
    pub bin_search: Option<String>,
    /// Runtime state directory handed to the service user.
    #[ortho_config(default = default_state_dir())]
    pub state_dir: Option<Utf8PathBuf>,
    /// Legacy configuration directory that receives compatibility symlinks.
    #[ortho_config(default = default_legacy_conf_dir())]
    pub legacy_conf_dir: Option<Utf8PathBuf>,
    /// Account that should own the state directory.
    #[ortho_config(default = String::from(DEFAULT_SERVICE_USER))]
    pub service_user: Option<String>,
    /// Zebra API socket polled before protocol daemons start.
    pub zebra_socket: Option<Utf8PathBuf>,
    /// Upper bound, in milliseconds, on the zebra readiness wait.
    #[ortho_config(default = DEFAULT_STARTUP_TIMEOUT_MS)]
    pub startup_timeout_ms: Option<u64>,
    /// `tracing` filter expression.
    #[ortho_config(default = String::from(DEFAULT_LOG_FILTER))]
    pub log_filter: Option<String>,
    /// Log output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Routing configuration file.
    #[must_use]
    pub fn conf_path(&self) -> &Utf8Path {
        self.conf_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_CONF_PATH))
    }

    /// Directory holding the routing configuration file.
    ///
    /// A bare file name resolves to `.`, matching `dirname`.
    #[must_use]
    pub fn conf_dir(&self) -> &Utf8Path {
        self.conf_path()
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
    }

    /// Search path for the routing daemons.
    #[must_use]
    pub fn sbin_search(&self) -> SearchPath {
        SearchPath::parse(self.sbin_search.as_deref().unwrap_or(DEFAULT_SBIN_SEARCH))
    }

    /// Search path for the control client.
    #[must_use]
    pub fn bin_search(&self) -> SearchPath {
        SearchPath::parse(self.bin_search.as_deref().unwrap_or(DEFAULT_BIN_SEARCH))
    }

    /// Runtime state directory.
    #[must_use]
    pub fn state_dir(&self) -> &Utf8Path {
        self.state_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_STATE_DIR))
    }

    /// Legacy configuration directory.
    #[must_use]
    pub fn legacy_conf_dir(&self) -> &Utf8Path {
        self.legacy_conf_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_LEGACY_CONF_DIR))
    }

    /// Service account name.
    #[must_use]
    pub fn service_user(&self) -> &str {
        self.service_user.as_deref().unwrap_or(DEFAULT_SERVICE_USER)
    }

    /// Zebra API socket, defaulting to `zserv.api` under the state directory.
    #[must_use]
    pub fn zebra_socket(&self) -> Utf8PathBuf {
        self.zebra_socket
            .clone()
            .unwrap_or_else(|| self.state_dir().join(ZEBRA_SOCKET_NAME))
    }

    /// Readiness wait bound.
    #[must_use]
    pub fn startup_timeout(&self) -> Duration {
        self.startup_timeout_ms
            .map_or(DEFAULT_STARTUP_TIMEOUT, Duration::from_millis)
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}
