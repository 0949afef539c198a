//! Configuration handling
//!
//! Two sources feed a run: the payload directories Helix exports into the work
//! item environment, and an optional TOML file with extra scenarios.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Shared payload root holding corerun and the xunit console runner
pub const CORRELATION_PAYLOAD_VAR: &str = "HELIX_CORRELATION_PAYLOAD";

/// Per work item payload root holding the test wrappers
pub const WORKITEM_PAYLOAD_VAR: &str = "HELIX_WORKITEM_PAYLOAD";

/// Optional path to an extra scenario file
pub const SCENARIO_FILE_VAR: &str = "RUNTEST_HELIX_CONFIG";

/// Payload directories resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDirs {
    /// Becomes CORE_ROOT for the child
    pub correlation: PathBuf,
    /// Base for relative wrapper paths
    pub workitem: PathBuf,
}

impl PayloadDirs {
    /// Read both payload variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Read both payload variables through `lookup`
    ///
    /// The correlation payload is checked first, so its error wins when both
    /// are missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let correlation = lookup(CORRELATION_PAYLOAD_VAR)
            .ok_or(Error::MissingEnvVar(CORRELATION_PAYLOAD_VAR))?;
        let workitem =
            lookup(WORKITEM_PAYLOAD_VAR).ok_or(Error::MissingEnvVar(WORKITEM_PAYLOAD_VAR))?;

        Ok(Self {
            correlation: PathBuf::from(correlation),
            workitem: PathBuf::from(workitem),
        })
    }

    /// Resolve a wrapper path given on the command line
    pub fn wrapper_path(&self, wrapper: &Path) -> PathBuf {
        self.workitem.join(wrapper)
    }
}

/// Extra scenarios loaded from a TOML file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Scenario definitions keyed by name
    #[serde(default)]
    pub scenarios: BTreeMap<String, ScenarioEntry>,
}

/// One scenario definition from a scenario file
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEntry {
    /// Scenario whose overrides are copied first
    pub prototype: Option<String>,

    /// Runtime knobs, written with the `COMPlus_` prefix
    #[serde(default)]
    pub complus: BTreeMap<String, String>,

    /// Variables written verbatim
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl ScenarioFile {
    /// Load a scenario file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse scenario file content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_payload_dirs_from_lookup() {
        let dirs = PayloadDirs::from_lookup(lookup_from(&[
            (CORRELATION_PAYLOAD_VAR, "/payload/shared"),
            (WORKITEM_PAYLOAD_VAR, "/payload/item"),
        ]))
        .unwrap();

        assert_eq!(dirs.correlation, PathBuf::from("/payload/shared"));
        assert_eq!(
            dirs.wrapper_path(Path::new("JIT/Regression/wrapper.dll")),
            PathBuf::from("/payload/item/JIT/Regression/wrapper.dll")
        );
    }

    #[test]
    fn test_missing_correlation_payload() {
        let err = PayloadDirs::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(CORRELATION_PAYLOAD_VAR)));
    }

    #[test]
    fn test_missing_workitem_payload() {
        let err = PayloadDirs::from_lookup(lookup_from(&[(CORRELATION_PAYLOAD_VAR, "/x")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(WORKITEM_PAYLOAD_VAR)));
    }

    #[test]
    fn test_parse_scenario_file() {
        let file = ScenarioFile::parse(
            r#"
            [scenarios.jitstress1_osr]
            prototype = "jitstress1"
            complus = { OSR_HitLimit = "1" }

            [scenarios.quickjit]
            env = { DOTNET_TC_QuickJitForLoops = "1" }
            "#,
        )
        .unwrap();

        assert_eq!(file.scenarios.len(), 2);
        let osr = &file.scenarios["jitstress1_osr"];
        assert_eq!(osr.prototype.as_deref(), Some("jitstress1"));
        assert_eq!(osr.complus["OSR_HitLimit"], "1");
        assert!(file.scenarios["quickjit"].prototype.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = ScenarioFile::parse("[scenarios.x]\nparent = \"baseline\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScenarioFile::load(Path::new("/nonexistent/scenarios.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
