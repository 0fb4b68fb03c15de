//! # Schema Merge
//!
//! Deep merge of two schema-shaped documents. The override side wins on
//! every conflict except when both sides hold an object under the same key,
//! in which case the two objects are merged recursively. Arrays are
//! replaced wholesale, never concatenated, so a synthesized `required` list
//! fully supersedes the base schema's list.

use serde_json::{Map, Value};

/// Merge `overlay` into `base`, returning a new document.
///
/// - Keys only in `base` pass through unchanged.
/// - Keys only in `overlay` are added.
/// - Keys in both: recurse if both values are objects, otherwise the
///   `overlay` value replaces the `base` value.
///
/// If either top-level input is not an object, `overlay` wins outright.
/// Neither input is modified.
pub fn merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        _ => overlay.clone(),
    }
}

fn merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, overlay_value) in overlay {
        let value = match (merged.get(key), overlay_value) {
            (Some(Value::Object(b)), Value::Object(o)) => Value::Object(merge_maps(b, o)),
            _ => overlay_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_input_schema() -> Value {
        json!({
            "inputParam": {
                "type": "object",
                "properties": {"name": {"type": "string"}},
                "required": ["name"]
            }
        })
    }

    #[test]
    fn test_merge_empty_overlay_is_identity() {
        let base = base_input_schema();
        assert_eq!(merge(&base, &json!({})), base);
    }

    #[test]
    fn test_merge_into_empty_base_is_overlay() {
        let overlay = base_input_schema();
        assert_eq!(merge(&json!({}), &overlay), overlay);
    }

    #[test]
    fn test_nested_objects_are_unioned() {
        let overlay = json!({
            "inputParam": {"properties": {"vcpus": {"type": "integer"}}}
        });
        let merged = merge(&base_input_schema(), &overlay);
        assert_eq!(
            merged,
            json!({
                "inputParam": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "vcpus": {"type": "integer"}
                    },
                    "required": ["name"]
                }
            })
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_concatenated() {
        let overlay = json!({"inputParam": {"required": ["vcpus", "name"]}});
        let merged = merge(&base_input_schema(), &overlay);
        assert_eq!(merged["inputParam"]["required"], json!(["vcpus", "name"]));
    }

    #[test]
    fn test_scalar_overlay_replaces_object() {
        let merged = merge(&json!({"a": {"b": 1}}), &json!({"a": 5}));
        assert_eq!(merged, json!({"a": 5}));
    }

    #[test]
    fn test_object_overlay_replaces_scalar() {
        let merged = merge(&json!({"a": 5}), &json!({"a": {"b": 1}}));
        assert_eq!(merged, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_null_overlay_replaces_value() {
        let merged = merge(&json!({"a": {"b": 1}}), &json!({"a": null}));
        assert_eq!(merged, json!({"a": null}));
    }

    #[test]
    fn test_non_object_roots() {
        assert_eq!(merge(&json!([1, 2]), &json!([3])), json!([3]));
        assert_eq!(merge(&json!({"a": 1}), &json!("x")), json!("x"));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = base_input_schema();
        let overlay = json!({"inputParam": {"properties": {"memory": {"type": "string"}}}});
        let (base_before, overlay_before) = (base.clone(), overlay.clone());
        let _ = merge(&base, &overlay);
        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
    }
}
