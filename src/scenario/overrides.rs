//! Environment override sets
//!
//! An ordered name/value mapping. Order matters because it is the order the
//! statements appear in the generated environment script.

use serde::ser::{Serialize, Serializer};

/// Prefix the runtime reads its configuration knobs from
pub const COMPLUS_PREFIX: &str = "COMPlus_";

/// Insertion-ordered environment overrides with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    entries: Vec<(String, String)>,
}

impl EnvOverrides {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set of runtime knobs, prefixing every name with `COMPlus_`
    pub fn complus<I, K, V>(knobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in knobs {
            set.set(format!("{COMPLUS_PREFIX}{}", name.as_ref()), value);
        }
        set
    }

    /// Set a variable
    ///
    /// Overwriting an existing name replaces its value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of a variable, if set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Copy of `self` with every entry of `other` layered on top
    pub fn merged(&self, other: &EnvOverrides) -> EnvOverrides {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.set(name, value);
        }
        merged
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

impl Serialize for EnvOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
