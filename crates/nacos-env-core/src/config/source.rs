use crate::config::map::ConfigMap;
use crate::config::value::ConfigValue;
use crate::format::flatten::flatten_config_map;
use serde::{Deserialize, Serialize};

/// A named layer of configuration properties.
///
/// Each document fetched from the config server becomes one property source.
/// The name is what the environment uses to find, replace or de-duplicate the
/// layer, so it must be stable across refreshes of the same document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySource {
    /// The name of the property source.
    pub name: String,

    /// Where the properties came from (e.g. `nacos:app.properties@DEFAULT_GROUP`).
    #[serde(default)]
    pub origin: String,

    /// The actual configuration properties.
    pub config: ConfigMap,
}

impl PropertySource {
    /// Creates a new PropertySource.
    pub fn new(name: impl Into<String>, config: ConfigMap) -> Self {
        Self {
            name: name.into(),
            origin: String::new(),
            config,
        }
    }

    /// Builder-style method to set the origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&ConfigValue> {
        self.config.get(key)
    }

    pub fn contains_property(&self, key: &str) -> bool {
        self.config.contains(key)
    }

    /// Returns the dot-notation names of every leaf property.
    pub fn property_names(&self) -> Vec<String> {
        flatten_config_map(&self.config).into_keys().collect()
    }
}
