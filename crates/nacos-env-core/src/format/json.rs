use crate::config::ConfigMap;
use crate::error::Result;
use crate::format::FormatParser;

pub struct JsonFormat;

impl FormatParser for JsonFormat {
    fn parse(&self, input: &str) -> Result<ConfigMap> {
        // An empty remote document is an empty layer, not a syntax error.
        if input.trim().is_empty() {
            return Ok(ConfigMap::new());
        }
        ConfigMap::from_json(input)
    }
}
