//! Test doubles shared by the orchestrator and entry point suites.

mod doubles;
mod identity;
mod loader;
mod reporter;

pub use doubles::{RecordingClient, RecordingLauncher, ScriptedResolver, StubProbe};
pub use identity::MockIdentity;
pub use loader::{FailingConfigLoader, RecordingConfigLoader};
pub use reporter::{BootEvent, RecordingBootReporter};
