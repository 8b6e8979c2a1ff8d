//! nacos-env core - property model and layered environment
//!
//! This crate provides the types remote configuration is loaded into:
//! parsed values, named property sources, composite layers and the
//! first-match-wins [`Environment`] an application resolves properties from.

pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod merge;
pub mod types;

pub use config::{CompositePropertySource, ConfigMap, ConfigValue, PropertyLayer, PropertySource};
pub use env::{Environment, MutablePropertySources};
pub use error::{EnvError, Result};
pub use format::{ConfigFormat, FormatParser};
pub use types::{DataId, Group};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
