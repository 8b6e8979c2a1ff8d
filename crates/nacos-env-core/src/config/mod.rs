pub mod composite;
pub mod map;
pub mod source;
pub mod value;

pub use composite::{CompositePropertySource, PropertyLayer};
pub use map::ConfigMap;
pub use source::PropertySource;
pub use value::ConfigValue;
