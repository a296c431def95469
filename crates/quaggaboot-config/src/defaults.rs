//! Default values applied when a setting is absent from every layer.

use std::time::Duration;

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Routing configuration file consumed by the daemons and `vtysh`.
pub const DEFAULT_CONF_PATH: &str = "/usr/local/etc/quagga/Quagga.conf";

/// Directories probed for the routing daemons, in order.
pub const DEFAULT_SBIN_SEARCH: &str = "/usr/local/sbin /usr/sbin /usr/lib/quagga";

/// Directories probed for the `vtysh` control client, in order.
pub const DEFAULT_BIN_SEARCH: &str = "/usr/local/bin /usr/bin /usr/lib/quagga";

/// Runtime state directory shared by the daemons.
pub const DEFAULT_STATE_DIR: &str = "/var/run/quagga";

/// Conventional configuration directory some tooling still expects.
pub const DEFAULT_LEGACY_CONF_DIR: &str = "/etc/quagga";

/// Service account that owns the state directory when present.
pub const DEFAULT_SERVICE_USER: &str = "quagga";

/// File name of zebra's API socket inside the state directory.
pub const ZEBRA_SOCKET_NAME: &str = "zserv.api";

/// Readiness bound in milliseconds, as accepted from configuration.
pub const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 3_000;

/// How long to wait for zebra's socket before starting protocol daemons.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_millis(DEFAULT_STARTUP_TIMEOUT_MS);

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binary.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

pub(crate) fn default_conf_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_CONF_PATH)
}

pub(crate) fn default_state_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_STATE_DIR)
}

pub(crate) fn default_legacy_conf_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_LEGACY_CONF_DIR)
}
