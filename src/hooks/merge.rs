//! Accumulation of hook results.
//!
//! Keyed results merge key by key so several providers can contribute to
//! the same named structure; anything else is appended positionally.

use serde::Serialize;
use serde_json::{Map, Value};

/// Accumulated results of a hook invoked on every provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HookResults {
    pub keyed: Map<String, Value>,
    pub positional: Vec<Value>,
}

impl HookResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one provider's result into the accumulator.
    pub fn accumulate(&mut self, result: Value) {
        match result {
            Value::Object(map) => merge_maps(&mut self.keyed, map),
            Value::Array(items) => self.positional.extend(items),
            other => self.positional.push(other),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyed.is_empty() && self.positional.is_empty()
    }
}

/// Merge `incoming` into `target` without clobbering nested structures.
///
/// - two maps merge key by key, recursively
/// - two lists concatenate
/// - a value merged into a list is appended
/// - colliding scalars become a list holding both
pub fn merge_recursive(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(map)) => merge_maps(existing, map),
        (Value::Array(existing), Value::Array(items)) => existing.extend(items),
        (Value::Array(existing), other) => existing.push(other),
        (Value::Object(existing), other) => {
            let key = existing.len().to_string();
            existing.insert(key, other);
        }
        (slot, Value::Object(map)) => {
            let mut merged = Map::new();
            merged.insert("0".to_string(), slot.take());
            merge_maps(&mut merged, map);
            *slot = Value::Object(merged);
        }
        (slot, Value::Array(mut items)) => {
            items.insert(0, slot.take());
            *slot = Value::Array(items);
        }
        (slot, other) => {
            let previous = slot.take();
            *slot = Value::Array(vec![previous, other]);
        }
    }
}

fn merge_maps(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match target.get_mut(&key) {
            Some(existing) => merge_recursive(existing, value),
            None => {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disjoint_keys_are_combined() {
        let mut results = HookResults::new();
        results.accumulate(json!({"foo": {"callback": "say"}}));
        results.accumulate(json!({"bar": {"callback": "about"}}));
        assert_eq!(
            Value::Object(results.keyed),
            json!({"foo": {"callback": "say"}, "bar": {"callback": "about"}})
        );
    }

    #[test]
    fn test_nested_maps_augment() {
        let mut results = HookResults::new();
        results.accumulate(json!({"index": {"callback": "home"}}));
        results.accumulate(json!({"index": {"weight": 5}}));
        assert_eq!(results.keyed["index"], json!({"callback": "home", "weight": 5}));
    }

    #[test]
    fn test_colliding_scalars_become_list() {
        let mut results = HookResults::new();
        results.accumulate(json!({"title": "a"}));
        results.accumulate(json!({"title": "b"}));
        results.accumulate(json!({"title": ["c"]}));
        assert_eq!(results.keyed["title"], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_lists_and_scalars_are_positional() {
        let mut results = HookResults::new();
        results.accumulate(json!(["page", "block"]));
        results.accumulate(json!("region"));
        results.accumulate(Value::Null);
        assert_eq!(results.positional, vec![json!("page"), json!("block"), json!("region"), Value::Null]);
        assert!(results.keyed.is_empty());
    }

    #[test]
    fn test_scalar_then_map_keeps_both() {
        let mut value = json!(1);
        merge_recursive(&mut value, json!({"x": 2}));
        assert_eq!(value, json!({"0": 1, "x": 2}));
    }
}
