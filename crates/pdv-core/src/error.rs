//! # Error Types
//!
//! Errors raised by the document primitives. Tree search and merge over a
//! well-formed document cannot fail, so the only failure points are pattern
//! compilation and parsing raw bytes.

use thiserror::Error;

/// Error raised by `pdv-core` operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A search or extraction pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern text as supplied by the caller.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// Raw bytes could not be parsed as a YAML/JSON document.
    #[error("document parse error: {0}")]
    Parse(String),
}
