//! # Document Parsing
//!
//! Templates, schemas and parameter files arrive as YAML or JSON text. YAML
//! is a superset of JSON, so everything is parsed through `serde_yaml` and
//! then converted into a `serde_json::Value` tree, which is the single
//! document model used by the matcher, the merge engine and the validator.

use serde_json::Value;

use crate::error::CoreError;

/// Parse raw YAML or JSON bytes into a document.
///
/// # Errors
///
/// Returns [`CoreError::Parse`] if the bytes are not UTF-8, are not valid
/// YAML/JSON, or contain values with no JSON equivalent (non-finite floats,
/// composite map keys).
pub fn parse_document(bytes: &[u8]) -> Result<Value, CoreError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CoreError::Parse(format!("input is not valid UTF-8: {e}")))?;
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| CoreError::Parse(e.to_string()))?;
    yaml_to_json_value(&yaml_value).map_err(CoreError::Parse)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped and the inner value is kept. Scalar map keys are
/// stringified; sequence or mapping keys are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
