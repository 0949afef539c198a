//! Error types for the scenario runner
//!
//! Every error is terminal for the current invocation. Messages are printed
//! as-is by `main`, so they name the offending value and, where it helps, the
//! fix.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scenario runner
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("unknown os: {0}")]
    UnsupportedPlatform(String),

    #[error("{0} must be defined in environment")]
    MissingEnvVar(&'static str),

    #[error("CORE_ROOT '{}' is not a directory", .0.display())]
    InvalidCoreRoot(PathBuf),

    #[error("Invalid scenario file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Invalid override '{name}' in scenario '{scenario}': {reason}")]
    InvalidOverride {
        scenario: String,
        name: String,
        reason: String,
    },

    #[error("Scenario '{scenario}' uses unknown prototype '{prototype}'")]
    UnknownPrototype { scenario: String, prototype: String },

    #[error("Scenario '{0}' inherits from itself through its prototype chain")]
    PrototypeCycle(String),

    // === Registry Errors ===
    #[error("Scenario \"{0}\" is unknown")]
    UnknownScenario(String),

    #[error("Scenario \"{0}\" is already registered")]
    DuplicateScenario(String),

    // === Execution Errors ===
    #[error("Test wrapper '{}' does not exist", .0.display())]
    WrapperNotFound(PathBuf),

    #[error("Failed to write environment file '{}': {source}", .path.display())]
    EnvFileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch '{}': {source}", .program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid override error
    pub fn invalid_override(scenario: &str, name: &str, reason: &str) -> Self {
        Self::InvalidOverride {
            scenario: scenario.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an unknown prototype error
    pub fn unknown_prototype(scenario: &str, prototype: &str) -> Self {
        Self::UnknownPrototype {
            scenario: scenario.to_string(),
            prototype: prototype.to_string(),
        }
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}
