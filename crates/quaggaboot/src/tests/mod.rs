//! Test suites for the boot orchestrator and its entry point.

mod support;
