//! JSON Merge Patch (RFC 7396) for layering settings files.

use serde_json::{Map, Value};

/// Applies `patch` on top of `base`.
///
/// Objects merge key by key, `null` removes a key, and anything else replaces
/// the base value outright. Arrays are never merged element-wise.
pub fn merge_patch(base: Value, patch: Value) -> Value {
    let Value::Object(overrides) = patch else {
        return patch;
    };
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in overrides {
        if value.is_null() {
            merged.remove(&key);
            continue;
        }
        let current = merged.remove(&key).unwrap_or(Value::Null);
        merged.insert(key, merge_patch(current, value));
    }
    Value::Object(merged)
}
