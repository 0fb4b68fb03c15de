//! # Input Schema Synthesis
//!
//! Builds the schema that a template's parameter values must satisfy.
//!
//! ## Pipeline
//!
//! 1. [`find_tokens`] scans the raw template text for placeholder lines.
//! 2. [`build_bindings`] maps each placeholder token to a definition key.
//! 3. [`synthesize_properties`] looks every definition key up in the
//!    definitions schema and places the matching fragment under
//!    `<root_key>.properties.<parameter>`.
//! 4. The properties fragment is merged into the base input schema.
//! 5. [`synthesize_required`] lists every parameter plus the configured
//!    extra keys under `<root_key>.required`, merged on top (replacing the
//!    base list).
//! 6. The `<root_key>` sub-object of the result is returned.
//!
//! Every step is a pure function of its inputs.

use pdv_core::{merge, MatchMode, SearchQuery};
use serde_json::{Map, Value};

use crate::config::{AmbiguityPolicy, SynthesisConfig};
use crate::error::SchemaError;
use crate::placeholder::{build_bindings, find_tokens, strip_marker, ParameterBinding};

const KEY_PROPERTIES: &str = "properties";
const KEY_REQUIRED: &str = "required";

/// Look up each bound definition key in `definitions` and emit
/// `{<root_key>: {"properties": {<parameter>: <fragment>}}}`.
///
/// Only object fragments are used. A definition key with no object match
/// contributes nothing. A key matching several object fragments resolves per
/// [`SynthesisConfig::ambiguous_definitions`].
///
/// # Errors
///
/// Returns [`SchemaError::InvalidPattern`] if a definition key is not a valid
/// regex, or [`SchemaError::AmbiguousDefinition`] under
/// [`AmbiguityPolicy::Reject`].
pub fn synthesize_properties(
    bindings: &ParameterBinding,
    definitions: &Value,
    config: &SynthesisConfig,
) -> Result<Value, SchemaError> {
    let mut properties = Map::new();

    for (token, definition_key) in bindings.iter() {
        let mut query = SearchQuery::new(MatchMode::MatchKey, definition_key)?;
        query.run(definitions);

        let fragments: Vec<Value> = query
            .into_results()
            .into_iter()
            .filter(Value::is_object)
            .collect();

        if fragments.len() > 1 {
            match config.ambiguous_definitions {
                AmbiguityPolicy::Reject => {
                    return Err(SchemaError::AmbiguousDefinition {
                        definition_key: definition_key.to_string(),
                        matches: fragments.len(),
                    });
                }
                AmbiguityPolicy::LastWins => {
                    tracing::warn!(
                        token,
                        definition_key,
                        matches = fragments.len(),
                        "definition key matches several fragments, using the last one"
                    );
                }
            }
        }

        let parameter = strip_marker(token, &config.marker);
        match fragments.into_iter().last() {
            Some(fragment) => {
                properties.insert(parameter.to_string(), fragment);
            }
            None => {
                tracing::debug!(token, definition_key, "no definition found for placeholder");
            }
        }
    }

    Ok(wrap(&config.root_key, KEY_PROPERTIES, Value::Object(properties)))
}

/// Emit `{<root_key>: {"required": [...]}}` listing every parameter name
/// followed by `extra_required`.
///
/// Order is deterministic: parameters in token order, then the extra keys
/// in the order given. Duplicates keep their first position.
pub fn synthesize_required<S: AsRef<str>>(
    bindings: &ParameterBinding,
    extra_required: &[S],
    config: &SynthesisConfig,
) -> Value {
    let mut required: Vec<Value> = Vec::with_capacity(bindings.len() + extra_required.len());
    let names = bindings
        .parameter_names(&config.marker)
        .chain(extra_required.iter().map(AsRef::as_ref));
    for name in names {
        let name = Value::String(name.to_string());
        if !required.contains(&name) {
            required.push(name);
        }
    }
    wrap(&config.root_key, KEY_REQUIRED, Value::Array(required))
}

/// Synthesize the input-parameter schema for `template_text`.
///
/// `definitions` supplies the field fragments; `base_input_schema` supplies
/// the `<root_key>` skeleton the synthesized properties and required list
/// are merged into.
///
/// # Errors
///
/// Fails with the error of the first failing step:
/// [`SchemaError::InvalidPattern`], [`SchemaError::MalformedToken`] or
/// [`SchemaError::AmbiguousDefinition`].
pub fn synthesize(
    template_text: &str,
    definitions: &Value,
    base_input_schema: &Value,
    config: &SynthesisConfig,
) -> Result<Value, SchemaError> {
    let tokens = find_tokens(template_text, &config.placeholder_pattern)?;
    tracing::debug!(count = tokens.len(), "placeholder occurrences found");

    let bindings = build_bindings(&tokens, &config.separator, &config.value_prefix)?;
    tracing::debug!(parameters = bindings.len(), "placeholder bindings built");

    let properties = synthesize_properties(&bindings, definitions, config)?;
    let with_properties = merge(base_input_schema, &properties);

    let required = synthesize_required(&bindings, &config.extra_required, config);
    let merged = merge(&with_properties, &required);

    Ok(merged
        .get(&config.root_key)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new())))
}

fn wrap(root_key: &str, section: &str, value: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(section.to_string(), value);
    let mut outer = Map::new();
    outer.insert(root_key.to_string(), Value::Object(inner));
    Value::Object(outer)
}
