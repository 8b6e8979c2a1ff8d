//! Deep merge of configuration maps.

use crate::config::{ConfigMap, ConfigValue};

/// Merges `overlay` into `base` in place, overlay winning.
///
/// Objects present on both sides are merged key by key; any other pair of
/// values (scalars, arrays, mixed types) is resolved by taking the overlay
/// value whole. Arrays are never concatenated.
///
/// The environment uses this to build its effective view, applying layers
/// from the lowest precedence up.
pub fn deep_merge(base: &mut ConfigMap, overlay: &ConfigMap) {
    for (key, overlay_val) in overlay.as_inner() {
        match base.as_inner_mut().get_mut(key) {
            Some(base_val) => merge_values(base_val, overlay_val),
            None => base.insert(key.clone(), overlay_val.clone()),
        }
    }
}

fn merge_values(base: &mut ConfigValue, overlay: &ConfigValue) {
    match (base, overlay) {
        (ConfigValue::Object(base_map), ConfigValue::Object(overlay_map)) => {
            for (key, overlay_inner) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_inner) => merge_values(base_inner, overlay_inner),
                    None => {
                        base_map.insert(key.clone(), overlay_inner.clone());
                    },
                }
            }
        },
        (base_val, overlay_val) => *base_val = overlay_val.clone(),
    }
}
