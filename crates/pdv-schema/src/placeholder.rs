//! # Placeholder Extraction
//!
//! Finds placeholder occurrences in raw template text and turns them into a
//! [`ParameterBinding`]: placeholder token → definition key.
//!
//! The scan runs over the serialized template text rather than the parsed
//! tree. With the default pattern each match is a whole line such as
//! `  - vcpus: $vcpus`, which splits into the definition key `vcpus` and the
//! token `$vcpus`.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::SchemaError;

/// Placeholder token → definition key.
///
/// Tokens are unique; inserting a token again replaces its definition key.
/// Iteration is in token order, so everything derived from a binding is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBinding {
    entries: BTreeMap<String, String>,
}

impl ParameterBinding {
    /// An empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to `definition_key`, returning the replaced key if the
    /// token was already bound.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        definition_key: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(token.into(), definition_key.into())
    }

    /// Definition key bound to `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tokens are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(token, definition_key)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parameter names: each token with `marker` stripped, in token order.
    pub fn parameter_names<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries.keys().map(move |token| strip_marker(token, marker))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterBinding {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut binding = Self::new();
        for (token, key) in iter {
            binding.insert(token, key);
        }
        binding
    }
}

/// Strip a leading `marker` from `token`. Tokens without the marker are
/// returned unchanged.
pub fn strip_marker<'a>(token: &'a str, marker: &str) -> &'a str {
    token.strip_prefix(marker).unwrap_or(token)
}

/// Every non-overlapping, leftmost match of `pattern` in `raw_text`, in
/// order of appearance. Duplicates are kept.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidPattern`] if `pattern` does not compile.
pub fn find_tokens(raw_text: &str, pattern: &str) -> Result<Vec<String>, SchemaError> {
    let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(re
        .find_iter(raw_text)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Build a binding from extracted tokens.
///
/// Each token is split on the first `separator`. The right side, trimmed,
/// is the binding key. The left side is trimmed, stripped of the literal
/// `value_prefix`, and trimmed again to form the definition key. A key seen
/// twice keeps its last definition.
///
/// # Errors
///
/// Returns [`SchemaError::MalformedToken`] if a token does not contain
/// `separator`, or if `separator` is empty.
pub fn build_bindings<S: AsRef<str>>(
    tokens: &[S],
    separator: &str,
    value_prefix: &str,
) -> Result<ParameterBinding, SchemaError> {
    let mut binding = ParameterBinding::new();
    for token in tokens {
        let token = token.as_ref();
        let split = if separator.is_empty() {
            None
        } else {
            token.split_once(separator)
        };
        let Some((left, right)) = split else {
            return Err(SchemaError::MalformedToken {
                token: token.to_string(),
                separator: separator.to_string(),
            });
        };
        let left = left.trim();
        let definition_key = left.strip_prefix(value_prefix).unwrap_or(left).trim();
        binding.insert(right.trim(), definition_key);
    }
    Ok(binding)
}
