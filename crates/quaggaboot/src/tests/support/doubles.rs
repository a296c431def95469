//! Recording doubles for the process and readiness collaborators.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use quaggaboot_config::SearchPath;

use crate::{
    CommitStatus, ControlClient, DaemonLauncher, LaunchResult, ProgramResolver, Readiness,
    ReadinessProbe, ResolutionError,
};

/// Resolver backed by an in-memory table of installed programs.
#[derive(Clone, Default)]
pub struct ScriptedResolver {
    installed: Arc<Mutex<HashMap<String, Utf8PathBuf>>>,
    lookups: Arc<Mutex<Vec<(String, SearchPath)>>>,
}

impl ScriptedResolver {
    /// Marks `program` as installed in `directory`.
    pub fn install(&self, program: &str, directory: &str) {
        self.installed
            .lock()
            .expect("resolver mutex poisoned")
            .insert(program.to_owned(), Utf8PathBuf::from(directory));
    }

    /// Removes `program` so lookups fail.
    pub fn uninstall(&self, program: &str) {
        self.installed
            .lock()
            .expect("resolver mutex poisoned")
            .remove(program);
    }

    /// Programs looked up so far with the search path used.
    pub fn lookups(&self) -> Vec<(String, SearchPath)> {
        self.lookups.lock().expect("resolver mutex poisoned").clone()
    }
}

impl ProgramResolver for ScriptedResolver {
    fn resolve(&self, program: &str, search: &SearchPath) -> Result<Utf8PathBuf, ResolutionError> {
        self.lookups
            .lock()
            .expect("resolver mutex poisoned")
            .push((program.to_owned(), search.clone()));
        self.installed
            .lock()
            .expect("resolver mutex poisoned")
            .get(program)
            .cloned()
            .ok_or_else(|| ResolutionError {
                program: program.to_owned(),
                search: search.clone(),
            })
    }
}

/// A launch observed by [`RecordingLauncher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLaunch {
    pub directory: Utf8PathBuf,
    pub daemon: String,
    pub flags: Vec<String>,
}

/// Launcher that records requests and fails on demand.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    launches: Arc<Mutex<Vec<RecordedLaunch>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
}

impl RecordingLauncher {
    /// Makes every launch of `daemon` fail with `diagnostic`.
    pub fn fail_on(&self, daemon: &str, diagnostic: &str) {
        self.failures
            .lock()
            .expect("launcher mutex poisoned")
            .insert(daemon.to_owned(), diagnostic.to_owned());
    }

    /// Launch requests in the order they were issued.
    pub fn launches(&self) -> Vec<RecordedLaunch> {
        self.launches.lock().expect("launcher mutex poisoned").clone()
    }

    /// Names of the daemons launched, in order.
    pub fn daemons(&self) -> Vec<String> {
        self.launches()
            .into_iter()
            .map(|launch| launch.daemon)
            .collect()
    }
}

impl DaemonLauncher for RecordingLauncher {
    fn launch(&self, directory: &Utf8Path, daemon: &str, flags: &[&str]) -> LaunchResult {
        self.launches
            .lock()
            .expect("launcher mutex poisoned")
            .push(RecordedLaunch {
                directory: directory.to_path_buf(),
                daemon: daemon.to_owned(),
                flags: flags.iter().map(|flag| (*flag).to_owned()).collect(),
            });
        match self
            .failures
            .lock()
            .expect("launcher mutex poisoned")
            .get(daemon)
        {
            Some(diagnostic) => LaunchResult::failure(daemon, diagnostic.clone()),
            None => LaunchResult::success(daemon),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum ClientBehaviour {
    #[default]
    Apply,
    Reject(i32),
    SpawnError,
}

/// Control client that records commits without running anything.
#[derive(Clone, Default)]
pub struct RecordingClient {
    commits: Arc<Mutex<Vec<(Utf8PathBuf, String)>>>,
    behaviour: Arc<Mutex<ClientBehaviour>>,
}

impl RecordingClient {
    /// Makes the client exit with `code`.
    pub fn reject_with(&self, code: i32) {
        *self.behaviour.lock().expect("client mutex poisoned") = ClientBehaviour::Reject(code);
    }

    /// Makes the client fail to execute.
    pub fn fail_to_spawn(&self) {
        *self.behaviour.lock().expect("client mutex poisoned") = ClientBehaviour::SpawnError;
    }

    /// Commits issued, as `(directory, program)` pairs.
    pub fn commits(&self) -> Vec<(Utf8PathBuf, String)> {
        self.commits.lock().expect("client mutex poisoned").clone()
    }
}

impl ControlClient for RecordingClient {
    fn commit(&self, directory: &Utf8Path, program: &str) -> io::Result<CommitStatus> {
        self.commits
            .lock()
            .expect("client mutex poisoned")
            .push((directory.to_path_buf(), program.to_owned()));
        match *self.behaviour.lock().expect("client mutex poisoned") {
            ClientBehaviour::Apply => Ok(CommitStatus::Applied),
            ClientBehaviour::Reject(code) => Ok(CommitStatus::Rejected { code: Some(code) }),
            ClientBehaviour::SpawnError => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
        }
    }
}

/// Readiness probe returning a fixed answer.
#[derive(Clone)]
pub struct StubProbe {
    answer: Readiness,
    waits: Arc<Mutex<Vec<(Utf8PathBuf, Duration)>>>,
}

impl StubProbe {
    pub fn answering(answer: Readiness) -> Self {
        Self {
            answer,
            waits: Arc::default(),
        }
    }

    /// Sockets waited on with the bound used.
    pub fn waits(&self) -> Vec<(Utf8PathBuf, Duration)> {
        self.waits.lock().expect("probe mutex poisoned").clone()
    }
}

impl ReadinessProbe for StubProbe {
    fn wait_ready(&self, socket: &Utf8Path, timeout: Duration) -> Readiness {
        self.waits
            .lock()
            .expect("probe mutex poisoned")
            .push((socket.to_path_buf(), timeout));
        self.answer
    }
}
