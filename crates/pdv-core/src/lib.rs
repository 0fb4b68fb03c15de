//! # pdv-core: Document Primitives for Parameterized Templates
//!
//! This crate holds the document-level building blocks every other crate in
//! the workspace relies on. Documents are plain `serde_json::Value` trees;
//! YAML input is converted into the same representation at the parse
//! boundary so the rest of the stack only ever sees one document model.
//!
//! ## Components
//!
//! - [`document`]: parse raw YAML/JSON bytes into a [`serde_json::Value`].
//! - [`matcher`]: depth-first key/value pattern search with structural
//!   deduplication of results ([`SearchQuery`], [`search`]).
//! - [`merge`]: deep, override-wins merge of two schema fragments.
//! - [`digest`]: content-derived resource identifiers for idempotent schema
//!   registration.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pdv-*` crates (this is the leaf of the DAG).
//! - No I/O. Callers hand in bytes or parsed documents.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Inputs are never mutated; every transformation returns a new document.

pub mod digest;
pub mod document;
pub mod error;
pub mod matcher;
pub mod merge;

// Re-export primary types for ergonomic imports.
pub use digest::{content_digest_hex, content_resource_id};
pub use document::{parse_document, yaml_to_json_value};
pub use error::CoreError;
pub use matcher::{search, MatchMode, SearchQuery};
pub use merge::merge;
