//! # Error Types
//!
//! Every failure in the extraction, synthesis and validation pipeline is a
//! [`SchemaError`] variant, so callers can tell a malformed instance
//! document apart from a bad schema or a schema violation.

use pdv_core::CoreError;
use thiserror::Error;

use crate::validate::ValidationViolations;

/// Error raised by the schema pipeline.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An instance document could not be parsed. Independent of any schema.
    #[error("parse error: {reason}")]
    Parse {
        /// Parser diagnostic.
        reason: String,
    },

    /// A schema could not be registered: the resource ID is unusable, is
    /// already bound to different content, or the schema bytes do not parse
    /// to a schema document.
    #[error("schema registration error for '{resource_id}': {reason}")]
    Registration {
        /// Resource ID the caller tried to register.
        resource_id: String,
        /// Reason the registration was rejected.
        reason: String,
    },

    /// The schema parsed but the validation engine rejected it (unresolvable
    /// `$ref`, invalid keyword values, ...).
    #[error("schema compile error for '{resource_id}': {reason}")]
    Compile {
        /// Resource ID of the schema being compiled.
        resource_id: String,
        /// Engine diagnostic.
        reason: String,
    },

    /// The instance does not conform to the schema.
    ///
    /// `message` is the single deepest violation; `violations` holds the
    /// full report.
    #[error("{message}")]
    Validation {
        /// Deepest violation, naming the instance pointer and constraint.
        message: String,
        /// Every violation reported by the engine, shallowest first.
        violations: ValidationViolations,
    },

    /// A placeholder token does not contain the binding separator.
    #[error("malformed placeholder token '{token}': missing separator '{separator}'")]
    MalformedToken {
        /// The offending token text.
        token: String,
        /// Separator that was expected.
        separator: String,
    },

    /// More than one object fragment in the definitions schema matches a
    /// definition key and the configured policy rejects ambiguity.
    #[error("ambiguous definition '{definition_key}': {matches} object fragments match")]
    AmbiguousDefinition {
        /// The definition key that was searched for.
        definition_key: String,
        /// Number of distinct object fragments found.
        matches: usize,
    },

    /// A placeholder or definition pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// Regex compiler diagnostic.
        reason: String,
    },

    /// Configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<CoreError> for SchemaError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPattern { pattern, source } => Self::InvalidPattern {
                pattern,
                reason: source.to_string(),
            },
            CoreError::Parse(reason) => Self::Parse { reason },
        }
    }
}
