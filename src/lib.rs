//! Helix test scenario runner
//!
//! Runs xunit test wrappers through corerun with the environment of a named
//! runtime stress scenario (JIT stress, GC stress, tiering modes).

pub mod cli;
pub mod commands;
pub mod common;
pub mod runner;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Platform, Result};
pub use runner::ScenarioRunner;
pub use scenario::{EnvOverrides, ScenarioBundle, ScenarioRegistry};
