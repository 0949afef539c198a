//! Host platform detection
//!
//! The runner executable name and the environment file syntax both depend on
//! whether the payload targets a Unix-like host or Windows.

use std::fmt;
use std::str::FromStr;

use super::{Error, Result};

/// Platforms the payload layout is known for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// Get the current platform
    pub fn current() -> Result<Self> {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        return Ok(Platform::Unix);

        #[cfg(target_os = "windows")]
        return Ok(Platform::Windows);

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        return Err(Error::UnsupportedPlatform(std::env::consts::OS.to_string()));
    }

    /// File name of the host executable inside CORE_ROOT
    pub fn corerun_name(self) -> &'static str {
        match self {
            Platform::Unix => "corerun",
            Platform::Windows => "CoreRun.exe",
        }
    }

    /// Extension of the generated environment script
    pub fn script_extension(self) -> &'static str {
        match self {
            Platform::Unix => "sh",
            Platform::Windows => "bat",
        }
    }

    /// Statement keyword that sets a variable in the environment script
    pub fn set_keyword(self) -> &'static str {
        match self {
            Platform::Unix => "export",
            Platform::Windows => "set",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Unix => write!(f, "unix"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "linux" | "macos" => Ok(Platform::Unix),
            "windows" => Ok(Platform::Windows),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }
}
