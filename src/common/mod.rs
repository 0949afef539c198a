//! Common utilities shared by the registry, the runner and the CLI

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;

pub use error::{Error, Result};
pub use platform::Platform;
