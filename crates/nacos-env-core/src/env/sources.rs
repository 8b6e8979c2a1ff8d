use crate::config::{ConfigMap, ConfigValue, PropertyLayer, PropertySource};
use crate::merge::deep_merge;

/// The ordered property-source chain of an environment.
///
/// Index 0 has the highest precedence: property lookups walk the layers from
/// the front and return the first value found. Layer names are unique; adding
/// a layer under a name that is already present removes the old one first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutablePropertySources {
    layers: Vec<PropertyLayer>,
}

impl MutablePropertySources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer with the highest precedence.
    pub fn add_first(&mut self, layer: impl Into<PropertyLayer>) {
        let layer = layer.into();
        self.remove(layer.name());
        self.layers.insert(0, layer);
    }

    /// Adds a layer with the lowest precedence.
    pub fn add_last(&mut self, layer: impl Into<PropertyLayer>) {
        let layer = layer.into();
        self.remove(layer.name());
        self.layers.push(layer);
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyLayer> {
        let index = self.layers.iter().position(|l| l.name() == name)?;
        Some(self.layers.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&PropertyLayer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Layer names, highest precedence first.
    pub fn names(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name().to_string()).collect()
    }

    pub fn layers(&self) -> &[PropertyLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// First-match-wins lookup across all layers.
    pub fn get_property(&self, key: &str) -> Option<&ConfigValue> {
        self.layers.iter().find_map(|l| l.get_property(key))
    }

    /// Replaces the source named like `source`, whether it is a top-level
    /// layer or a child of a composite layer.
    ///
    /// Returns the previous source, or `None` if no layer carried that name.
    pub fn replace_source(&mut self, source: PropertySource) -> Option<PropertySource> {
        let mut pending = source;
        for layer in &mut self.layers {
            match layer.replace_source(pending) {
                Ok(previous) => return Some(previous),
                Err(unmatched) => pending = unmatched,
            }
        }
        None
    }

    /// Collapses the chain into the effective view.
    ///
    /// Layers are deep-merged from the lowest precedence up, so for every key
    /// the result holds what `get_property` would return.
    pub fn merged(&self) -> ConfigMap {
        let mut result = ConfigMap::new();

        for layer in self.layers.iter().rev() {
            match layer {
                PropertyLayer::Source(source) => deep_merge(&mut result, &source.config),
                PropertyLayer::Composite(composite) => {
                    for child in composite.sources().iter().rev() {
                        deep_merge(&mut result, &child.config);
                    }
                },
            }
        }

        result
    }
}
