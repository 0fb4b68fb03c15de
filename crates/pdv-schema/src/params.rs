//! # Input Parameter Validation
//!
//! Validates the parameter values supplied for a parameterized template
//! against the schema synthesized from that template.

use pdv_core::content_resource_id;
use serde_json::Value;

use crate::config::SynthesisConfig;
use crate::error::SchemaError;
use crate::synthesize::synthesize;
use crate::validate::SchemaRegistry;

/// Validate `params_bytes` against the input schema synthesized from
/// `template_text`.
///
/// The synthesized schema is registered in `registry` under an ID derived
/// from its content, so validating many parameter files for the same
/// template reuses one registration. Returns the synthesized schema.
///
/// # Errors
///
/// [`SchemaError::Parse`] if the parameter document is malformed, any
/// synthesis error, [`SchemaError::Compile`] if the synthesized schema is
/// rejected by the engine, or [`SchemaError::Validation`].
pub fn validate_input_params(
    registry: &SchemaRegistry,
    params_bytes: &[u8],
    template_text: &str,
    definitions: &Value,
    base_input_schema: &Value,
    config: &SynthesisConfig,
) -> Result<Value, SchemaError> {
    let params = pdv_core::parse_document(params_bytes)?;
    let schema = synthesize(template_text, definitions, base_input_schema, config)?;

    let resource_id = content_resource_id(&schema);
    tracing::debug!(%resource_id, "validating input parameters");

    let compiled = registry.compile_value(schema.clone(), &resource_id)?;
    compiled.validate(&params)?;
    Ok(schema)
}
