//! Legacy configuration symlinks.
//!
//! Older tooling, `vtysh` included, finds its configuration by convention
//! under `/etc/quagga`. When the active configuration lives elsewhere and the
//! legacy directory exists, the conventional file names are pointed at the
//! active files. Files already present, including dangling symlinks, are left
//! alone so repeated boots are no-ops.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use quaggaboot_config::Config;
use tracing::{info, warn};

const COMPAT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::compat");

/// Conventional name of the integrated routing configuration.
pub const LEGACY_CONF_NAME: &str = "Quagga.conf";

/// Conventional name of the `vtysh` configuration.
pub const VTYSH_CONF_NAME: &str = "vtysh.conf";

/// Filesystem operations used by the fix-up.
pub trait CompatFilesystem {
    /// True when `path` is a directory.
    fn is_dir(&self, path: &Utf8Path) -> bool;

    /// True when anything, including a dangling symlink, occupies `path`.
    fn occupied(&self, path: &Utf8Path) -> bool;

    /// Creates `link` pointing at `target`.
    fn symlink(&self, target: &Utf8Path, link: &Utf8Path) -> io::Result<()>;
}

/// Filesystem backend operating on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFilesystem;

impl CompatFilesystem for HostFilesystem {
    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn occupied(&self, path: &Utf8Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    #[cfg(unix)]
    fn symlink(&self, target: &Utf8Path, link: &Utf8Path) -> io::Result<()> {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(not(unix))]
    fn symlink(&self, _target: &Utf8Path, _link: &Utf8Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symlinks unsupported on this platform",
        ))
    }
}

/// A symlink the fix-up wants to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatLink {
    /// Path created under the legacy directory.
    pub link: Utf8PathBuf,
    /// Active file the link points at.
    pub target: Utf8PathBuf,
}

/// Lists the links that are missing, without touching the filesystem.
pub fn plan_links<F: CompatFilesystem>(config: &Config, filesystem: &F) -> Vec<CompatLink> {
    let legacy = config.legacy_conf_dir();
    let conf_dir = config.conf_dir();
    if conf_dir == legacy || !filesystem.is_dir(legacy) {
        return Vec::new();
    }

    [
        (LEGACY_CONF_NAME, config.conf_path().to_path_buf()),
        (VTYSH_CONF_NAME, conf_dir.join(VTYSH_CONF_NAME)),
    ]
    .into_iter()
    .map(|(name, target)| CompatLink {
        link: legacy.join(name),
        target,
    })
    .filter(|candidate| !filesystem.occupied(&candidate.link))
    .collect()
}

/// Creates the missing legacy links and returns the ones that were made.
///
/// Failures are logged and skipped; the boot continues without the link.
pub fn apply_legacy_links<F: CompatFilesystem>(config: &Config, filesystem: &F) -> Vec<CompatLink> {
    plan_links(config, filesystem)
        .into_iter()
        .filter(|candidate| match filesystem.symlink(&candidate.target, &candidate.link) {
            Ok(()) => {
                info!(
                    target: COMPAT_TARGET,
                    link = %candidate.link,
                    target_path = %candidate.target,
                    "created legacy configuration symlink"
                );
                true
            }
            Err(error) => {
                warn!(
                    target: COMPAT_TARGET,
                    link = %candidate.link,
                    target_path = %candidate.target,
                    %error,
                    "failed to create legacy configuration symlink"
                );
                false
            }
        })
        .collect()
}
