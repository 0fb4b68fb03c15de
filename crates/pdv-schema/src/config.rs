//! # Configuration
//!
//! Knobs for placeholder extraction, schema synthesis and validation. All
//! fields have defaults matching the VNFD template conventions: placeholders
//! are `$`-prefixed, each placeholder line reads `definition_key: $token`,
//! optionally as a YAML list item (`- definition_key: $token`), and the
//! synthesized schema lives under `inputParam`.
//!
//! Configuration is always passed explicitly. Nothing here reads files or
//! environment variables; the CLI decides where a config document comes from.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Default placeholder pattern: any line containing a `$`.
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = r".*\$.*";

/// Default prefix for bare resource IDs.
pub const DEFAULT_URI_PREFIX: &str = "https://schemas.pdv.local/";

/// What to do when a definition key matches several object fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Use the last fragment in traversal order and log a warning.
    #[default]
    LastWins,
    /// Fail with [`SchemaError::AmbiguousDefinition`].
    Reject,
}

/// Settings for [`crate::synthesize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Regex run over the raw template text to find placeholder occurrences.
    pub placeholder_pattern: String,
    /// Separates the definition key (left) from the token (right).
    pub separator: String,
    /// Literal prefix stripped from the definition key, e.g. a YAML list dash.
    pub value_prefix: String,
    /// Marker stripped from a token to form the parameter name.
    pub marker: String,
    /// Top-level key of the base schema that holds the input-parameter schema.
    pub root_key: String,
    /// Parameter names required in addition to the template's placeholders.
    pub extra_required: Vec<String>,
    /// Policy for definition keys matching several fragments.
    pub ambiguous_definitions: AmbiguityPolicy,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            placeholder_pattern: DEFAULT_PLACEHOLDER_PATTERN.to_string(),
            separator: ":".to_string(),
            value_prefix: "-".to_string(),
            marker: "$".to_string(),
            root_key: "inputParam".to_string(),
            extra_required: vec!["vnfd_id".to_string(), "name".to_string()],
            ambiguous_definitions: AmbiguityPolicy::LastWins,
        }
    }
}

/// JSON Schema draft used when a schema does not declare `$schema`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaDraft {
    /// Draft 4.
    Draft4,
    /// Draft 6.
    Draft6,
    /// Draft 7.
    #[default]
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    Draft202012,
}

impl SchemaDraft {
    pub(crate) fn to_engine(self) -> jsonschema::Draft {
        match self {
            Self::Draft4 => jsonschema::Draft::Draft4,
            Self::Draft6 => jsonschema::Draft::Draft6,
            Self::Draft7 => jsonschema::Draft::Draft7,
            Self::Draft201909 => jsonschema::Draft::Draft201909,
            Self::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Settings for [`crate::SchemaRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Default draft.
    pub draft: SchemaDraft,
    /// Base URI prepended to resource IDs that are not already absolute.
    pub uri_prefix: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::default(),
            uri_prefix: DEFAULT_URI_PREFIX.to_string(),
        }
    }
}

/// Complete configuration document.
///
/// ```yaml
/// synthesis:
///   placeholder_pattern: '.*\$.*'
///   extra_required: [vnfd_id, name]
///   ambiguous_definitions: reject
/// validator:
///   draft: draft7
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdvConfig {
    /// Synthesis settings.
    pub synthesis: SynthesisConfig,
    /// Validator settings.
    pub validator: ValidatorConfig,
}

impl PdvConfig {
    /// Parse a YAML (or JSON) configuration document and check it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Config`] on parse failure, unknown fields, or
    /// values rejected by [`PdvConfig::validate`].
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| SchemaError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let s = &self.synthesis;
        if s.separator.is_empty() {
            return Err(SchemaError::Config("synthesis.separator must not be empty".into()));
        }
        if s.marker.is_empty() {
            return Err(SchemaError::Config("synthesis.marker must not be empty".into()));
        }
        if s.root_key.is_empty() {
            return Err(SchemaError::Config("synthesis.root_key must not be empty".into()));
        }
        if let Err(e) = regex::Regex::new(&s.placeholder_pattern) {
            return Err(SchemaError::Config(format!(
                "synthesis.placeholder_pattern is not a valid regex: {e}"
            )));
        }
        if !self.validator.uri_prefix.contains(':') {
            return Err(SchemaError::Config(format!(
                "validator.uri_prefix '{}' is not an absolute URI",
                self.validator.uri_prefix
            )));
        }
        Ok(())
    }
}
