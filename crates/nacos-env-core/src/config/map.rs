use crate::config::value::ConfigValue;
use crate::error::{EnvError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The key-value content of one property source.
///
/// Wraps an `IndexMap<String, ConfigValue>` so that iteration follows the
/// order keys appeared in the remote document. Nested objects are addressed
/// with dot notation (`spring.datasource.url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigMap {
    #[serde(flatten)]
    inner: IndexMap<String, ConfigValue>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    pub fn from_inner(inner: IndexMap<String, ConfigValue>) -> Self {
        Self { inner }
    }

    pub fn as_inner(&self) -> &IndexMap<String, ConfigValue> {
        &self.inner
    }

    pub fn as_inner_mut(&mut self) -> &mut IndexMap<String, ConfigValue> {
        &mut self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Retrieves a value by key, supporting dot notation for nested access.
    ///
    /// # Example
    /// ```
    /// # use nacos_env_core::ConfigMap;
    /// let map = ConfigMap::from_json(r#"{"server": {"port": 8080}}"#).unwrap();
    /// assert_eq!(map.get("server.port").and_then(|v| v.as_i64()), Some(8080));
    /// assert!(map.get("server.host").is_none());
    /// ```
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        if path.is_empty() {
            return None;
        }

        if !path.contains('.') {
            return self.inner.get(path);
        }

        // A literal dotted key wins over walking the tree.
        if let Some(value) = self.inner.get(path) {
            return Some(value);
        }

        let mut parts = path.split('.');
        let mut current_value = self.inner.get(parts.next()?)?;

        for part in parts {
            match current_value {
                ConfigValue::Object(map) => {
                    current_value = map.get(part)?;
                },
                _ => return None,
            }
        }

        Some(current_value)
    }

    /// Returns true if `path` resolves to a value.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Parses a JSON string into a ConfigMap.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| EnvError::parse_error_with_cause("json", e.to_string(), e))
    }

    /// Parses a YAML string into a ConfigMap.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| EnvError::parse_error_with_cause("yaml", e.to_string(), e))
    }
}

impl From<IndexMap<String, ConfigValue>> for ConfigMap {
    fn from(map: IndexMap<String, ConfigValue>) -> Self {
        ConfigMap { inner: map }
    }
}
