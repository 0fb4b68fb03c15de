//! # pdv-schema: Input Schema Synthesis & Validation
//!
//! Validates parameterized templates and the parameter values supplied for
//! them.
//!
//! A parameterized template contains placeholder tokens (`$vcpus`) where
//! concrete values will later be substituted. This crate derives, from the
//! template text and a library of field definitions, the JSON Schema those
//! later values must satisfy, and validates documents against it.
//!
//! ## Modules
//!
//! - [`placeholder`]: token extraction from raw template text and
//!   token → definition-key bindings.
//! - [`mod@synthesize`]: builds the input-parameter schema from bindings, a
//!   definitions schema and a base schema.
//! - [`mod@validate`]: [`SchemaRegistry`], compilation, and validation with
//!   single-line error normalization.
//! - [`params`]: end-to-end parameter validation against a template.
//! - [`config`]: explicit configuration for all of the above.
//!
//! ## Crate Policy
//!
//! - Depends only on `pdv-core` internally.
//! - No file or network I/O: schemas and templates are passed in as values
//!   or bytes, and `$ref` resolves only against the registry.
//! - Every failure is a typed [`SchemaError`]; malformed input never panics.

pub mod config;
pub mod error;
pub mod params;
pub mod placeholder;
pub mod synthesize;
pub mod validate;

pub use config::{AmbiguityPolicy, PdvConfig, SchemaDraft, SynthesisConfig, ValidatorConfig};
pub use error::SchemaError;
pub use params::validate_input_params;
pub use placeholder::{build_bindings, find_tokens, strip_marker, ParameterBinding};
pub use synthesize::{synthesize, synthesize_properties, synthesize_required};
pub use validate::{
    validate, validate_document, CompiledSchema, SchemaRegistry, ValidationViolations, Violation,
};
