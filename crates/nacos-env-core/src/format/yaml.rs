use crate::config::ConfigMap;
use crate::error::Result;
use crate::format::FormatParser;

pub struct YamlFormat;

impl FormatParser for YamlFormat {
    fn parse(&self, input: &str) -> Result<ConfigMap> {
        if input.trim().is_empty() {
            return Ok(ConfigMap::new());
        }
        ConfigMap::from_yaml(input)
    }
}
