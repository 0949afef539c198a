//! Test scenarios
//!
//! A scenario is a named bundle of environment overrides that puts the runtime
//! into one stress or configuration mode. Bundles can be seeded from a
//! prototype; the prototype's overrides are copied once and never linked.

mod catalog;
mod overrides;
mod registry;

pub use catalog::{ScenarioDef, CATALOG, DEFAULT_SCENARIO};
pub use overrides::{EnvOverrides, COMPLUS_PREFIX};
pub use registry::ScenarioRegistry;

use serde::Serialize;

/// A named set of environment overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioBundle {
    name: String,
    overrides: EnvOverrides,
}

impl ScenarioBundle {
    /// Create a bundle with only its own overrides
    pub fn new(name: impl Into<String>, overrides: EnvOverrides) -> Self {
        Self {
            name: name.into(),
            overrides,
        }
    }

    /// Create a bundle from a copy of `prototype`'s overrides plus `overrides`
    pub fn derived(
        name: impl Into<String>,
        prototype: &ScenarioBundle,
        overrides: &EnvOverrides,
    ) -> Self {
        Self {
            name: name.into(),
            overrides: prototype.overrides.merged(overrides),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overrides(&self) -> &EnvOverrides {
        &self.overrides
    }
}
