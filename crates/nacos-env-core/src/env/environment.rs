//! Shared, thread-safe handle to a property-source chain.

use std::sync::Arc;

use parking_lot::RwLock;

use super::MutablePropertySources;
use crate::config::{ConfigMap, ConfigValue, PropertyLayer, PropertySource};
use crate::error::{EnvError, Result};

/// Handle to the application's property-resolution environment.
///
/// Cloning is cheap and every clone sees the same chain. Loading code adds
/// layers once during startup; afterwards refresh callbacks replace the
/// individual sources they own while readers keep resolving properties.
///
/// # Example
///
/// ```
/// use nacos_env_core::{ConfigMap, Environment, PropertySource};
///
/// let env = Environment::new();
/// let mut config = ConfigMap::new();
/// config.insert("server.port", "8080");
/// env.add_last(PropertySource::new("defaults", config));
///
/// assert_eq!(env.get_string("server.port").as_deref(), Some("8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    sources: Arc<RwLock<MutablePropertySources>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sources(sources: MutablePropertySources) -> Self {
        Self {
            sources: Arc::new(RwLock::new(sources)),
        }
    }

    pub fn add_first(&self, layer: impl Into<PropertyLayer>) {
        self.sources.write().add_first(layer);
    }

    pub fn add_last(&self, layer: impl Into<PropertyLayer>) {
        self.sources.write().add_last(layer);
    }

    pub fn remove(&self, name: &str) -> Option<PropertyLayer> {
        self.sources.write().remove(name)
    }

    /// See [`MutablePropertySources::replace_source`].
    pub fn replace_source(&self, source: PropertySource) -> Option<PropertySource> {
        self.sources.write().replace_source(source)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.read().contains(name)
    }

    pub fn source_names(&self) -> Vec<String> {
        self.sources.read().names()
    }

    pub fn get_property(&self, key: &str) -> Option<ConfigValue> {
        self.sources.read().get_property(key).cloned()
    }

    /// Resolves a scalar property as text.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.sources
            .read()
            .get_property(key)
            .and_then(ConfigValue::to_property_string)
    }

    /// Like [`get_property`](Self::get_property) but missing keys are an error.
    pub fn require_property(&self, key: &str) -> Result<ConfigValue> {
        self.get_property(key)
            .ok_or_else(|| EnvError::property_not_found(key))
    }

    /// The effective view of every layer merged into one map.
    pub fn merged(&self) -> ConfigMap {
        self.sources.read().merged()
    }

    /// A point-in-time copy of the chain.
    pub fn snapshot(&self) -> MutablePropertySources {
        self.sources.read().clone()
    }

    /// Runs `f` with read access to the chain.
    pub fn with_sources<R>(&self, f: impl FnOnce(&MutablePropertySources) -> R) -> R {
        f(&self.sources.read())
    }

    /// Returns true if both handles point to the same chain.
    pub fn same_as(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.sources, &other.sources)
    }
}
