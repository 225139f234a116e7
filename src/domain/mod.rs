//! Core value types shared by the merger, the loader and the initializers

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A configuration tree: scalar, sequence or string-keyed mapping.
pub type ConfigValue = Value;

/// Custom configurations keyed by source identifier (the matched file path).
pub type ConfigSet = BTreeMap<String, ConfigValue>;

/// Result of a load.
///
/// A glob that matches several custom sources yields a `Set`; every other
/// outcome (default only, a single custom source) yields a `Single` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadedConfig {
    Single(ConfigValue),
    Set(ConfigSet),
}

impl LoadedConfig {
    /// Build the result of custom discovery: one source collapses to `Single`.
    pub fn from_sources(mut sources: Vec<(String, ConfigValue)>) -> Self {
        if sources.len() == 1 {
            let (_, value) = sources.remove(0);
            return LoadedConfig::Single(value);
        }
        LoadedConfig::Set(sources.into_iter().collect())
    }

    pub fn empty() -> Self {
        LoadedConfig::Single(Value::Object(Map::new()))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, LoadedConfig::Set(_))
    }

    /// Number of configuration trees held.
    pub fn len(&self) -> usize {
        match self {
            LoadedConfig::Single(_) => 1,
            LoadedConfig::Set(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_single(&self) -> Option<&ConfigValue> {
        match self {
            LoadedConfig::Single(value) => Some(value),
            LoadedConfig::Set(_) => None,
        }
    }

    pub fn as_set(&self) -> Option<&ConfigSet> {
        match self {
            LoadedConfig::Single(_) => None,
            LoadedConfig::Set(set) => Some(set),
        }
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = &ConfigValue> + '_> {
        match self {
            LoadedConfig::Single(value) => Box::new(std::iter::once(value)),
            LoadedConfig::Set(set) => Box::new(set.values()),
        }
    }

    pub fn values_mut(&mut self) -> Box<dyn Iterator<Item = &mut ConfigValue> + '_> {
        match self {
            LoadedConfig::Single(value) => Box::new(std::iter::once(value)),
            LoadedConfig::Set(set) => Box::new(set.values_mut()),
        }
    }

    /// Flatten into one tree; a set becomes an object keyed by source.
    pub fn into_value(self) -> ConfigValue {
        match self {
            LoadedConfig::Single(value) => value,
            LoadedConfig::Set(set) => Value::Object(set.into_iter().collect()),
        }
    }
}
