use indexmap::IndexSet;

use crate::config::source::PropertySource;
use crate::config::value::ConfigValue;

/// An ordered group of property sources exposed under a single name.
///
/// Lookups walk the children in insertion order and return the first match,
/// so a child added earlier shadows any later child defining the same key.
/// Child names are unique: adding a second source under an existing name is
/// ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositePropertySource {
    name: String,
    sources: Vec<PropertySource>,
}

impl CompositePropertySource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a child source.
    ///
    /// Returns `false` (and leaves the composite untouched) when a child with
    /// the same name is already present.
    pub fn add_property_source(&mut self, source: PropertySource) -> bool {
        if self.contains_source(&source.name) {
            return false;
        }
        self.sources.push(source);
        true
    }

    /// Replaces the child with the same name as `source`, returning the old one.
    ///
    /// Unknown names are not inserted; the source is handed back instead.
    pub fn replace(&mut self, source: PropertySource) -> Result<PropertySource, PropertySource> {
        match self.sources.iter_mut().find(|s| s.name == source.name) {
            Some(slot) => Ok(std::mem::replace(slot, source)),
            None => Err(source),
        }
    }

    pub fn contains_source(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name == name)
    }

    pub fn get_source(&self, name: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// The children, highest precedence first.
    pub fn sources(&self) -> &[PropertySource] {
        &self.sources
    }

    pub fn get_property(&self, key: &str) -> Option<&ConfigValue> {
        self.sources.iter().find_map(|s| s.get_property(key))
    }

    /// Leaf property names of all children, de-duplicated, in precedence order.
    pub fn property_names(&self) -> Vec<String> {
        let mut names = IndexSet::new();
        for source in &self.sources {
            names.extend(source.property_names());
        }
        names.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

/// One entry of the environment's property-source chain.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyLayer {
    Source(PropertySource),
    Composite(CompositePropertySource),
}

impl PropertyLayer {
    pub fn name(&self) -> &str {
        match self {
            PropertyLayer::Source(source) => &source.name,
            PropertyLayer::Composite(composite) => composite.name(),
        }
    }

    pub fn get_property(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            PropertyLayer::Source(source) => source.get_property(key),
            PropertyLayer::Composite(composite) => composite.get_property(key),
        }
    }

    /// Swaps in `source` if this layer is, or directly contains, a source of
    /// the same name. Gives the source back when nothing matched.
    pub fn replace_source(
        &mut self,
        source: PropertySource,
    ) -> Result<PropertySource, PropertySource> {
        match self {
            PropertyLayer::Source(current) if current.name == source.name => {
                Ok(std::mem::replace(current, source))
            },
            PropertyLayer::Composite(composite) => composite.replace(source),
            _ => Err(source),
        }
    }
}

impl From<PropertySource> for PropertyLayer {
    fn from(source: PropertySource) -> Self {
        PropertyLayer::Source(source)
    }
}

impl From<CompositePropertySource> for PropertyLayer {
    fn from(composite: CompositePropertySource) -> Self {
        PropertyLayer::Composite(composite)
    }
}
