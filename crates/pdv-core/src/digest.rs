//! # Content Digests
//!
//! Content-derived identifiers for schema documents.
//!
//! A schema registry binds each resource ID to exactly one document, and a
//! second registration of the same ID with different content is rejected.
//! Deriving the ID from the document content makes registration idempotent:
//! two callers holding the same schema compute the same ID and the second
//! registration is a no-op.
//!
//! The digest is SHA-256 over the compact `serde_json` serialization. Object
//! keys are held in a sorted map, so structurally equal documents always
//! serialize to the same bytes.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the document's serialized form.
pub fn content_digest_hex(document: &Value) -> String {
    // Serializing a `Value` to a Vec cannot fail: keys are always strings.
    let bytes = serde_json::to_vec(document).unwrap_or_default();
    let hash = Sha256::digest(&bytes);
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Resource ID of the form `sha256-<hex>.json` derived from document content.
pub fn content_resource_id(document: &Value) -> String {
    format!("sha256-{}.json", content_digest_hex(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_digest_is_64_hex_chars() {
        let hex = content_digest_hex(&json!({"type": "object"}));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_digest_ignores_key_insertion_order() {
        let a: Value = serde_json::from_str(r#"{"type":"object","required":["a"]}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"required":["a"],"type":"object"}"#).unwrap();
        assert_eq!(content_digest_hex(&a), content_digest_hex(&b));
    }

    #[test]
    fn test_digest_distinguishes_content() {
        let a = json!({"type": "object"});
        let b = json!({"type": "array"});
        assert_ne!(content_resource_id(&a), content_resource_id(&b));
    }

    #[test]
    fn test_known_digest_of_empty_object() {
        // SHA-256 of the two bytes "{}".
        assert_eq!(
            content_digest_hex(&json!({})),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_resource_id_shape() {
        let id = content_resource_id(&json!({}));
        assert!(id.starts_with("sha256-"));
        assert!(id.ends_with(".json"));
    }
}
