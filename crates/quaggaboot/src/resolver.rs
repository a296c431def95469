//! Locates executables on an ordered search path.

use std::fs;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use quaggaboot_config::SearchPath;
use thiserror::Error;

/// No directory on the search path holds an executable of the given name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{program}' not found in search path: {search}")]
pub struct ResolutionError {
    /// Program that was looked up.
    pub program: String,
    /// Directories that were probed.
    pub search: SearchPath,
}

/// Finds the directory that holds a program.
pub trait ProgramResolver: Send + Sync {
    /// Returns the first directory on `search` that contains an executable
    /// named `program`.
    fn resolve(&self, program: &str, search: &SearchPath) -> Result<Utf8PathBuf, ResolutionError>;
}

/// Resolver that probes the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchPathResolver;

impl ProgramResolver for SearchPathResolver {
    fn resolve(&self, program: &str, search: &SearchPath) -> Result<Utf8PathBuf, ResolutionError> {
        resolve(program, search)
    }
}

/// Returns the first directory on `search` where `directory/program` is an
/// executable file. Earlier directories win.
pub fn resolve(program: &str, search: &SearchPath) -> Result<Utf8PathBuf, ResolutionError> {
    search
        .iter()
        .find(|directory| is_executable(directory.join(program).as_std_path()))
        .map(Utf8Path::to_path_buf)
        .ok_or_else(|| ResolutionError {
            program: program.to_owned(),
            search: search.clone(),
        })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}
