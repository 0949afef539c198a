//! Environment override script
//!
//! The test wrappers source the file named by `__TestEnv` before starting the
//! test process, so each override becomes one `export` (sh) or `set` (cmd)
//! statement.

use std::path::Path;

use crate::common::{Error, Platform, Result};
use crate::scenario::EnvOverrides;

/// Render overrides as script lines for `platform`, in override order
pub fn render(overrides: &EnvOverrides, platform: Platform) -> String {
    let keyword = platform.set_keyword();
    overrides
        .iter()
        .map(|(name, value)| format!("{keyword} {name}={value}\n"))
        .collect()
}

/// Write the rendered script to `path`, replacing any previous file
pub fn write(path: &Path, overrides: &EnvOverrides, platform: Platform) -> Result<()> {
    std::fs::write(path, render(overrides, platform)).map_err(|source| Error::EnvFileWrite {
        path: path.to_path_buf(),
        source,
    })
}
