use crate::config::{ConfigMap, ConfigValue};
use indexmap::IndexMap;

/// Flattens a hierarchical ConfigMap into a flat map with dot-notation keys.
///
/// Example:
/// {"server": {"port": 80}} -> {"server.port": 80}
///
/// Arrays are kept as leaf values; empty objects disappear.
pub fn flatten_config_map(config: &ConfigMap) -> IndexMap<String, ConfigValue> {
    let mut flat_map = IndexMap::new();
    for (key, value) in config.as_inner() {
        flatten_value(key, value, &mut flat_map);
    }
    flat_map
}

pub(crate) fn flatten_value(
    prefix: &str,
    value: &ConfigValue,
    target: &mut IndexMap<String, ConfigValue>,
) {
    match value {
        ConfigValue::Object(map) => {
            for (curr_key, curr_val) in map {
                flatten_value(&format!("{}.{}", prefix, curr_key), curr_val, target);
            }
        },
        _ => {
            target.insert(prefix.to_string(), value.clone());
        },
    }
}
