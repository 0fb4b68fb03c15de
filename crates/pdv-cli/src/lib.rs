//! # pdv-cli: Parameterized Data Validator Command-Line Interface
//!
//! File-facing wrapper around `pdv-schema`. The library crates never touch
//! the filesystem; this crate reads templates, schemas, parameter files and
//! the optional configuration document, then delegates.
//!
//! ## Subcommands
//!
//! - `tokens`: list placeholder occurrences and the resulting bindings
//! - `synthesize`: print the input-parameter schema for a template
//! - `validate`: validate a document against a schema file
//! - `check-params`: validate a parameter file against a template
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers write to a caller-supplied writer so they can be tested
//!   without capturing stdout.

pub mod input;
pub mod synthesize;
pub mod tokens;
pub mod validate;
