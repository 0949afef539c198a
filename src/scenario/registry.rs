//! Scenario registry
//!
//! Maps scenario names to bundles. Names are unique: registering a name twice
//! is an error, whether the clash is inside the built-in catalog or between a
//! scenario file and the catalog.

use crate::common::config::{ScenarioEntry, ScenarioFile};
use crate::common::{Error, Result};

use super::catalog::CATALOG;
use super::{EnvOverrides, ScenarioBundle};

/// Registered scenarios in registration order
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<ScenarioBundle>,
}

impl ScenarioRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry holding the built-in catalog
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for def in CATALOG {
            let own = EnvOverrides::complus(def.complus.iter().copied());
            registry.define(def.name, def.prototype, &own)?;
        }
        Ok(registry)
    }

    /// Register a bundle under its name
    pub fn register(&mut self, bundle: ScenarioBundle) -> Result<()> {
        if self.contains(bundle.name()) {
            return Err(Error::DuplicateScenario(bundle.name().to_string()));
        }
        tracing::trace!(scenario = bundle.name(), "registered scenario");
        self.scenarios.push(bundle);
        Ok(())
    }

    /// Register a bundle built from an optional prototype plus `own`
    pub fn define(&mut self, name: &str, prototype: Option<&str>, own: &EnvOverrides) -> Result<()> {
        let bundle = match prototype {
            Some(prototype) => {
                let base = self
                    .get(prototype)
                    .ok_or_else(|| Error::unknown_prototype(name, prototype))?;
                ScenarioBundle::derived(name, base, own)
            }
            None => ScenarioBundle::new(name, own.clone()),
        };
        self.register(bundle)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a scenario by name
    pub fn lookup(&self, name: &str) -> Result<&ScenarioBundle> {
        self.get(name)
            .ok_or_else(|| Error::UnknownScenario(name.to_string()))
    }

    fn get(&self, name: &str) -> Option<&ScenarioBundle> {
        self.scenarios.iter().find(|s| s.name() == name)
    }

    /// All scenarios in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioBundle> {
        self.scenarios.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name())
    }

    /// Add every scenario of a scenario file
    ///
    /// File scenarios may use built-in scenarios or each other as prototypes,
    /// in any order.
    pub fn extend_from_file(&mut self, file: &ScenarioFile) -> Result<()> {
        if let Some(name) = file.scenarios.keys().find(|name| self.contains(name)) {
            return Err(Error::DuplicateScenario(name.clone()));
        }

        let mut resolving = Vec::new();
        for name in file.scenarios.keys() {
            self.define_from_file(name, file, &mut resolving)?;
        }
        Ok(())
    }

    fn define_from_file(
        &mut self,
        name: &str,
        file: &ScenarioFile,
        resolving: &mut Vec<String>,
    ) -> Result<()> {
        if self.contains(name) {
            return Ok(());
        }
        if resolving.iter().any(|n| n == name) {
            return Err(Error::PrototypeCycle(name.to_string()));
        }
        let Some(entry) = file.scenarios.get(name) else {
            return Ok(());
        };

        resolving.push(name.to_string());
        if let Some(prototype) = entry.prototype.as_deref() {
            if file.scenarios.contains_key(prototype) {
                self.define_from_file(prototype, file, resolving)?;
            }
        }
        resolving.pop();

        let own = entry_overrides(name, entry)?;
        tracing::debug!(scenario = name, overrides = own.len(), "loaded scenario from file");
        self.define(name, entry.prototype.as_deref(), &own)
    }
}

/// Validated overrides of a file entry: runtime knobs first, then raw variables
fn entry_overrides(scenario: &str, entry: &ScenarioEntry) -> Result<EnvOverrides> {
    for (name, value) in entry.complus.iter().chain(entry.env.iter()) {
        validate_override(scenario, name, value)?;
    }

    let mut own = EnvOverrides::complus(entry.complus.iter().map(|(k, v)| (k, v.clone())));
    for (name, value) in &entry.env {
        own.set(name.clone(), value.clone());
    }
    Ok(own)
}

fn validate_override(scenario: &str, name: &str, value: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_name = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid_name {
        return Err(Error::invalid_override(
            scenario,
            name,
            "name must be letters, digits and underscores, not starting with a digit",
        ));
    }
    if value.contains(['\n', '\r']) {
        return Err(Error::invalid_override(
            scenario,
            name,
            "value must fit on one line",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides_of(registry: &ScenarioRegistry, name: &str) -> Vec<(String, String)> {
        registry
            .lookup(name)
            .unwrap()
            .overrides()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builtin_contains_catalog() {
        let registry = ScenarioRegistry::builtin().unwrap();
        for name in [
            "baseline",
            "jitstress1",
            "jitstress2",
            "jitstress1_tiered",
            "jitstress2_tiered",
            "gcstress0x3",
            "gcstress0xc",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.names().count(), 7);
        assert!(!registry.contains("gcstress0x2"));
    }

    #[test]
    fn test_builtin_overrides() {
        let registry = ScenarioRegistry::builtin().unwrap();

        assert_eq!(
            overrides_of(&registry, "baseline"),
            pairs(&[("COMPlus_TieredCompilation", "0")])
        );
        assert_eq!(
            overrides_of(&registry, "jitstress1"),
            pairs(&[
                ("COMPlus_TieredCompilation", "0"),
                ("COMPlus_JitStress", "1")
            ])
        );
        assert_eq!(
            overrides_of(&registry, "jitstress2"),
            pairs(&[
                ("COMPlus_TieredCompilation", "0"),
                ("COMPlus_JitStress", "2")
            ])
        );
        assert_eq!(
            overrides_of(&registry, "gcstress0x3"),
            pairs(&[
                ("COMPlus_TieredCompilation", "0"),
                ("COMPlus_COMPlus_GCStress", "0x3")
            ])
        );
        assert_eq!(
            overrides_of(&registry, "gcstress0xc"),
            pairs(&[
                ("COMPlus_TieredCompilation", "0"),
                ("COMPlus_COMPlus_GCStress", "0xc")
            ])
        );
    }

    #[test]
    fn test_tiered_scenarios_skip_baseline() {
        let registry = ScenarioRegistry::builtin().unwrap();
        let expected = pairs(&[
            ("COMPlus_JitStress", "2"),
            ("COMPlus_TieredCompilation", "1"),
        ]);
        assert_eq!(overrides_of(&registry, "jitstress1_tiered"), expected);
        assert_eq!(overrides_of(&registry, "jitstress2_tiered"), expected);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = ScenarioRegistry::builtin().unwrap();
        let err = registry.lookup("jitstress3").unwrap_err();
        assert!(matches!(err, Error::UnknownScenario(ref n) if n == "jitstress3"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ScenarioRegistry::new();
        registry
            .register(ScenarioBundle::new("a", EnvOverrides::complus([("X", "1")])))
            .unwrap();

        let err = registry
            .register(ScenarioBundle::new("a", EnvOverrides::complus([("X", "2")])))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(ref n) if n == "a"));

        // First registration is untouched
        assert_eq!(
            registry.lookup("a").unwrap().overrides().get("COMPlus_X"),
            Some("1")
        );
    }

    #[test]
    fn test_define_unknown_prototype() {
        let mut registry = ScenarioRegistry::new();
        let err = registry
            .define("child", Some("missing"), &EnvOverrides::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPrototype { .. }));
    }

    #[test]
    fn test_extend_from_file() {
        let file = ScenarioFile::parse(
            r#"
            [scenarios.osr_stress]
            prototype = "osr"
            complus = { JitStress = "1" }

            [scenarios.osr]
            prototype = "baseline"
            complus = { OSR_HitLimit = "1", TieredCompilation = "1" }
            env = { DOTNET_TC_QuickJitForLoops = "1" }
            "#,
        )
        .unwrap();

        let mut registry = ScenarioRegistry::builtin().unwrap();
        registry.extend_from_file(&file).unwrap();

        assert_eq!(
            overrides_of(&registry, "osr"),
            pairs(&[
                ("COMPlus_TieredCompilation", "1"),
                ("COMPlus_OSR_HitLimit", "1"),
                ("DOTNET_TC_QuickJitForLoops", "1"),
            ])
        );
        assert_eq!(
            overrides_of(&registry, "osr_stress"),
            pairs(&[
                ("COMPlus_TieredCompilation", "1"),
                ("COMPlus_OSR_HitLimit", "1"),
                ("DOTNET_TC_QuickJitForLoops", "1"),
                ("COMPlus_JitStress", "1"),
            ])
        );
    }

    #[test]
    fn test_extend_from_file_rejects_builtin_names() {
        let file = ScenarioFile::parse("[scenarios.baseline]\ncomplus = { JitStress = \"1\" }\n")
            .unwrap();
        let mut registry = ScenarioRegistry::builtin().unwrap();

        let err = registry.extend_from_file(&file).unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(ref n) if n == "baseline"));
    }

    #[test]
    fn test_extend_from_file_detects_cycles() {
        let file = ScenarioFile::parse(
            "[scenarios.a]\nprototype = \"b\"\n[scenarios.b]\nprototype = \"a\"\n",
        )
        .unwrap();
        let mut registry = ScenarioRegistry::builtin().unwrap();

        let err = registry.extend_from_file(&file).unwrap_err();
        assert!(matches!(err, Error::PrototypeCycle(_)));
    }

    #[test]
    fn test_extend_from_file_unknown_prototype() {
        let file = ScenarioFile::parse("[scenarios.a]\nprototype = \"gcstress0x2\"\n").unwrap();
        let mut registry = ScenarioRegistry::builtin().unwrap();

        let err = registry.extend_from_file(&file).unwrap_err();
        assert!(
            matches!(err, Error::UnknownPrototype { ref prototype, .. } if prototype == "gcstress0x2")
        );
    }

    #[test]
    fn test_extend_from_file_validates_overrides() {
        let mut registry = ScenarioRegistry::builtin().unwrap();

        let bad_name = ScenarioFile::parse("[scenarios.a]\nenv = { \"1BAD\" = \"1\" }\n").unwrap();
        assert!(matches!(
            registry.extend_from_file(&bad_name).unwrap_err(),
            Error::InvalidOverride { .. }
        ));

        let bad_value =
            ScenarioFile::parse("[scenarios.b]\nenv = { GOOD = \"1\\nexport X=2\" }\n").unwrap();
        assert!(matches!(
            registry.extend_from_file(&bad_value).unwrap_err(),
            Error::InvalidOverride { .. }
        ));
    }
}
