//! Built-in scenario catalog
//!
//! Names and overrides here are referenced as string constants by the test
//! build and the Helix job definitions. Keep them byte-for-byte stable, quirks
//! included: the `_tiered` entries do not start from `baseline`,
//! `jitstress1_tiered` runs `JitStress=2`, and the GC stress knobs carry a
//! doubled `COMPlus_` prefix.

/// Scenario used when none is requested
pub const DEFAULT_SCENARIO: &str = "baseline";

/// Static definition of a built-in scenario
#[derive(Debug, Clone, Copy)]
pub struct ScenarioDef {
    /// Unique scenario name
    pub name: &'static str,
    /// Earlier catalog entry whose overrides are copied first
    pub prototype: Option<&'static str>,
    /// Runtime knobs, written with the `COMPlus_` prefix
    pub complus: &'static [(&'static str, &'static str)],
}

/// All built-in scenarios, prototypes before the entries that use them
pub static CATALOG: &[ScenarioDef] = &[
    ScenarioDef {
        name: "baseline",
        prototype: None,
        complus: &[("TieredCompilation", "0")],
    },
    // Jit stress
    ScenarioDef {
        name: "jitstress1",
        prototype: Some("baseline"),
        complus: &[("JitStress", "1")],
    },
    ScenarioDef {
        name: "jitstress2",
        prototype: Some("baseline"),
        complus: &[("JitStress", "2")],
    },
    ScenarioDef {
        name: "jitstress1_tiered",
        prototype: None,
        complus: &[("JitStress", "2"), ("TieredCompilation", "1")],
    },
    ScenarioDef {
        name: "jitstress2_tiered",
        prototype: None,
        complus: &[("JitStress", "2"), ("TieredCompilation", "1")],
    },
    // GC stress
    ScenarioDef {
        name: "gcstress0x3",
        prototype: Some("baseline"),
        complus: &[("COMPlus_GCStress", "0x3")],
    },
    ScenarioDef {
        name: "gcstress0xc",
        prototype: Some("baseline"),
        complus: &[("COMPlus_GCStress", "0xc")],
    },
];
