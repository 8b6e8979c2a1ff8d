use std::io::BufReader;

use indexmap::IndexMap;
use java_properties::PropertiesIter;

use crate::config::{ConfigMap, ConfigValue};
use crate::error::{EnvError, Result};
use crate::format::FormatParser;
use crate::format::flatten::flatten_value;

/// Java `.properties` documents.
///
/// Line continuations, `\uXXXX` escapes and both `=`/`:` separators follow
/// the Java rules. Dotted keys are expanded into nested objects so that a
/// properties document and a YAML document describing the same settings
/// produce the same tree. Every leaf stays a string.
///
/// A key that is both a value and a parent (`db=plain` and `db.url=x`) keeps
/// both: the value stays nested and the children are stored under literal
/// dotted keys at the top level, which [`ConfigMap::get`] resolves first.
pub struct PropertiesFormat;

impl FormatParser for PropertiesFormat {
    fn parse(&self, input: &str) -> Result<ConfigMap> {
        let mut root = IndexMap::new();

        PropertiesIter::new_with_encoding(BufReader::new(input.as_bytes()), encoding_rs::UTF_8)
            .read_into(|key, value| insert_property(&mut root, &key, value))
            .map_err(|e| {
                let message = match e.line_number() {
                    Some(line) => format!("invalid syntax at line {}: {}", line, e),
                    None => e.to_string(),
                };
                EnvError::parse_error("properties", message)
            })?;

        Ok(ConfigMap::from_inner(root))
    }
}

fn insert_property(root: &mut IndexMap<String, ConfigValue>, key: &str, value: String) {
    let parts: Vec<&str> = key.split('.').collect();

    match classify(root, &parts) {
        Slot::Free => insert_nested(root, &parts, value),
        // An ancestor already holds a value: keep this key flat.
        Slot::UnderValue => {
            root.insert(key.to_string(), ConfigValue::String(value));
        },
        // The key already has children: they move to flat keys.
        Slot::Parent => {
            let (last, parents) = match parts.split_last() {
                Some(split) => split,
                None => return,
            };
            let Some(map) = nested_map_mut(root, parents) else {
                return;
            };
            let previous = map.insert(last.to_string(), ConfigValue::String(value));

            if let Some(children @ ConfigValue::Object(_)) = previous {
                let mut flat = IndexMap::new();
                flatten_value(key, &children, &mut flat);
                root.extend(flat);
            }
        },
    }
}

enum Slot {
    Free,
    UnderValue,
    Parent,
}

fn classify(root: &IndexMap<String, ConfigValue>, parts: &[&str]) -> Slot {
    let mut current = root;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i + 1 == parts.len();
        match current.get(*part) {
            None => return Slot::Free,
            Some(ConfigValue::Object(map)) if is_last => {
                return if map.is_empty() { Slot::Free } else { Slot::Parent };
            },
            Some(ConfigValue::Object(map)) => current = map,
            Some(_) if is_last => return Slot::Free,
            Some(_) => return Slot::UnderValue,
        }
    }

    Slot::Free
}

fn nested_map_mut<'a>(
    root: &'a mut IndexMap<String, ConfigValue>,
    path: &[&str],
) -> Option<&'a mut IndexMap<String, ConfigValue>> {
    let mut current = root;
    for part in path {
        current = match current.get_mut(*part) {
            Some(ConfigValue::Object(map)) => map,
            _ => return None,
        };
    }
    Some(current)
}

fn insert_nested(root: &mut IndexMap<String, ConfigValue>, parts: &[&str], value: String) {
    let Some((last, parents)) = parts.split_last() else {
        return;
    };

    let mut current_map = root;
    for part in parents {
        let entry = current_map
            .entry(part.to_string())
            .or_insert_with(|| ConfigValue::Object(IndexMap::new()));

        current_map = match entry {
            ConfigValue::Object(next_map) => next_map,
            _ => return,
        };
    }

    current_map.insert(last.to_string(), ConfigValue::String(value));
}
