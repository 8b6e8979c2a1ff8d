#![allow(dead_code)]
use nacos_env_core::{CompositePropertySource, ConfigFormat, ConfigMap, PropertySource};

/// Helper to create a ConfigMap from a JSON string slice.
/// Panics if the JSON is invalid (intended for tests).
pub fn config_from_json(json: &str) -> ConfigMap {
    ConfigMap::from_json(json).expect("Failed to create test config from JSON")
}

/// Helper to create a PropertySource from a document in the given format.
pub fn source(name: &str, format: ConfigFormat, content: &str) -> PropertySource {
    let config = format.parse(content).expect("Failed to parse test document");
    PropertySource::new(name, config)
}

/// A composite built the way remote documents are stacked: first argument wins.
pub fn composite(name: &str, sources: Vec<PropertySource>) -> CompositePropertySource {
    let mut composite = CompositePropertySource::new(name);
    for source in sources {
        composite.add_property_source(source);
    }
    composite
}

/// The same settings written in all three formats.
pub const APP_PROPERTIES: &str = "
server.port=8080
spring.datasource.url=jdbc:mysql://db:3306/app
spring.datasource.pool.size=10
";

pub const APP_YAML: &str = "
server:
  port: 8080
spring:
  datasource:
    url: jdbc:mysql://db:3306/app
    pool:
      size: 10
";

pub const APP_JSON: &str = r#"{
  "server": { "port": 8080 },
  "spring": {
    "datasource": {
      "url": "jdbc:mysql://db:3306/app",
      "pool": { "size": 10 }
    }
  }
}"#;
