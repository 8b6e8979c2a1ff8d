//! Document formats understood by the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::ConfigMap;
use crate::error::{EnvError, Result};

pub mod flatten;
pub mod json;
pub mod properties;
pub mod yaml;

/// Supported document formats.
///
/// Parsed case-insensitively from its name (`properties`, `yaml`/`yml`,
/// `json`). Defaults to `Properties`, the format remote documents are assumed
/// to have when none is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConfigFormat {
    Json,
    Yaml,
    #[default]
    Properties,
}

impl ConfigFormat {
    /// Returns the canonical lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Properties => "properties",
        }
    }

    /// Returns the file extensions associated with this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Yaml => &["yaml", "yml"],
            ConfigFormat::Properties => &["properties"],
        }
    }

    /// Guesses the format from a file extension (without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "properties" => Some(ConfigFormat::Properties),
            _ => None,
        }
    }

    /// Returns the parser for this format.
    pub fn parser(&self) -> &'static dyn FormatParser {
        match self {
            ConfigFormat::Json => &json::JsonFormat,
            ConfigFormat::Yaml => &yaml::YamlFormat,
            ConfigFormat::Properties => &properties::PropertiesFormat,
        }
    }

    /// Parses `input` in this format.
    pub fn parse(&self, input: &str) -> Result<ConfigMap> {
        self.parser().parse(input)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim()).ok_or_else(|| EnvError::UnsupportedFormat(s.to_string()))
    }
}

impl Serialize for ConfigFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConfigFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A trait for parsing configuration from a string.
pub trait FormatParser: Send + Sync {
    /// Parses the input string into a ConfigMap.
    fn parse(&self, input: &str) -> Result<ConfigMap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("YAML".parse::<ConfigFormat>().unwrap(), ConfigFormat::Yaml);
        assert_eq!("yml".parse::<ConfigFormat>().unwrap(), ConfigFormat::Yaml);
        assert_eq!(" json ".parse::<ConfigFormat>().unwrap(), ConfigFormat::Json);

        let err = "xml".parse::<ConfigFormat>().unwrap_err();
        assert!(matches!(err, EnvError::UnsupportedFormat(ref f) if f == "xml"));
    }

    #[test]
    fn test_default_is_properties() {
        assert_eq!(ConfigFormat::default(), ConfigFormat::Properties);
        assert_eq!(ConfigFormat::default().to_string(), "properties");
    }

    #[test]
    fn test_serde_by_name() {
        let format: ConfigFormat = serde_json::from_str(r#""Json""#).unwrap();
        assert_eq!(format, ConfigFormat::Json);
        assert_eq!(serde_json::to_string(&ConfigFormat::Yaml).unwrap(), r#""yaml""#);
    }

    #[test]
    fn test_parse_dispatches_on_format() {
        let map = ConfigFormat::Yaml.parse("a:\n  b: 1\n").unwrap();
        assert_eq!(map.get("a.b").unwrap().as_i64(), Some(1));

        let map = ConfigFormat::Properties.parse("a.b=1").unwrap();
        assert_eq!(map.get("a.b").unwrap().as_str(), Some("1"));
    }
}
