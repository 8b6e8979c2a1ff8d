//! The layered property environment configuration is loaded into.

mod environment;
mod sources;

pub use environment::Environment;
pub use sources::MutablePropertySources;
