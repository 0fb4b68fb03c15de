//! # Tree Matcher
//!
//! Depth-first pattern search over a parsed document.
//!
//! A [`SearchQuery`] walks every object entry in the tree and records either
//! the entry's value (when searching by key) or the entry's key (when
//! searching by string value). Results are deduplicated by deep structural
//! equality and kept in discovery order.
//!
//! ## Traversal Rules
//!
//! - Object entries are tested against the pattern; the entry's value is
//!   then descended into if it is an object or array, whether or not it
//!   matched. Matching never prunes traversal.
//! - Array elements are only descended into. Scalars sitting directly in an
//!   array are never tested.
//! - Patterns are unanchored: `vcpus` matches the key `max_vcpus`. Anchor the
//!   pattern explicitly (`^vcpus$`) for whole-key matches.

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// What a [`SearchQuery`] tests the pattern against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Match object keys; record the value stored under a matching key.
    MatchKey,
    /// Match string values; record the key under which a matching string sits.
    MatchValue,
}

/// A single search over one or more documents.
///
/// Created per search, mutated only while traversing, then read back via
/// [`SearchQuery::results`] or [`SearchQuery::into_results`].
#[derive(Debug, Clone)]
pub struct SearchQuery {
    mode: MatchMode,
    pattern: Regex,
    results: Vec<Value>,
}

impl SearchQuery {
    /// Compile a new query.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    pub fn new(mode: MatchMode, pattern: &str) -> Result<Self, CoreError> {
        let compiled = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            mode,
            pattern: compiled,
            results: Vec::new(),
        })
    }

    /// The mode this query was created with.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The pattern source text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Results collected so far, in discovery order.
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    /// Consume the query and return its results.
    pub fn into_results(self) -> Vec<Value> {
        self.results
    }

    /// Traverse `document`, adding matches to the result set.
    ///
    /// Running the same query over several documents accumulates results
    /// across all of them, still deduplicated.
    pub fn run(&mut self, document: &Value) {
        match document {
            Value::Object(map) => self.visit_object(map),
            Value::Array(items) => self.visit_array(items),
            _ => {}
        }
    }

    fn visit_object(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            match self.mode {
                MatchMode::MatchKey => {
                    if self.pattern.is_match(key) {
                        self.record(value);
                    }
                }
                MatchMode::MatchValue => {
                    if let Value::String(s) = value {
                        if self.pattern.is_match(s) {
                            self.record(&Value::String(key.clone()));
                        }
                    }
                }
            }

            match value {
                Value::Object(child) => self.visit_object(child),
                Value::Array(items) => self.visit_array(items),
                _ => {}
            }
        }
    }

    fn visit_array(&mut self, items: &[Value]) {
        for item in items {
            match item {
                Value::Object(child) => self.visit_object(child),
                Value::Array(nested) => self.visit_array(nested),
                _ => {}
            }
        }
    }

    /// Append `value` unless a structurally equal result is already present.
    fn record(&mut self, value: &Value) {
        if !self.results.contains(value) {
            self.results.push(value.clone());
        }
    }
}

/// Search `document` for keys or string values matching `pattern`.
///
/// Convenience wrapper that builds a [`SearchQuery`], runs it once and
/// returns the results.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPattern`] if `pattern` does not compile.
pub fn search(document: &Value, mode: MatchMode, pattern: &str) -> Result<Vec<Value>, CoreError> {
    let mut query = SearchQuery::new(mode, pattern)?;
    query.run(document);
    Ok(query.into_results())
}
