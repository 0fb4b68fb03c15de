//! # Schema Validation
//!
//! Compiles JSON Schema documents with the `jsonschema` crate and validates
//! instance documents against them.
//!
//! ## Resource Registry
//!
//! Every compiled schema is registered in a [`SchemaRegistry`] under a
//! resource ID. Bare IDs such as `inputParam.json` are turned into absolute
//! URIs with the configured prefix (`https://schemas.pdv.local/inputParam.json`);
//! IDs that already carry a scheme are used as-is. A resource ID may end in a
//! JSON-pointer fragment (`vnfdInputSchema.json#/vnfdInput`), in which case
//! the whole document is registered and the compiled schema targets the
//! fragment.
//!
//! Schemas registered in the same registry can `$ref` each other. References
//! to anything else fail compilation; nothing is fetched over the network.
//!
//! A resource ID binds to exactly one document. Re-registering identical
//! content is a no-op; registering different content under a bound ID fails
//! with [`SchemaError::Registration`]. Callers that share a registry across
//! threads should derive IDs from content with
//! [`pdv_core::content_resource_id`].
//!
//! ## Error Normalization
//!
//! The engine reports every violated constraint. The full list is kept in
//! [`ValidationViolations`], ordered shallowest to deepest instance path, and
//! the last (deepest) entry becomes the single-line error message.

use std::collections::HashMap;
use std::fmt;

use jsonschema::{Retrieve, Uri, Validator};
use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::config::ValidatorConfig;
use crate::error::SchemaError;

/// Resolves `$ref` URIs to schemas registered in the same registry.
///
/// Holds a snapshot of the registry taken at compile time.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let base = uri_str.split('#').next().unwrap_or(uri_str);

        match self.schemas_by_uri.get(base) {
            Some(value) => Ok(value.clone()),
            None => Err(format!("schema resource '{base}' is not registered").into()),
        }
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Nesting depth of the violating instance location.
    pub fn depth(&self) -> usize {
        self.instance_path.matches('/').count()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Violations from one validation, shallowest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Order `violations` by instance depth, keeping engine order for ties.
    pub fn new(mut violations: Vec<Violation>) -> Self {
        violations.sort_by_key(Violation::depth);
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The deepest violation on a single line.
    pub fn summary(&self) -> String {
        self.violations
            .last()
            .map(|v| v.to_string().replace(['\r', '\n'], " "))
            .unwrap_or_default()
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A schema compiled against one registry.
pub struct CompiledSchema {
    resource_id: String,
    uri: String,
    validator: Validator,
}

impl CompiledSchema {
    /// Resource ID as given by the caller.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Absolute URI the schema was compiled from, including any fragment.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns true if `instance` conforms.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Validation`] carrying the deepest violation as
    /// its message and the full violation list.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            return Ok(());
        }

        let violations = ValidationViolations::new(errors);
        let message = violations.summary();
        tracing::debug!(
            resource_id = %self.resource_id,
            violations = violations.len(),
            %message,
            "instance failed validation"
        );
        Err(SchemaError::Validation { message, violations })
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("resource_id", &self.resource_id)
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

/// Registry of schema resources for `$ref` resolution and compilation.
///
/// ## Thread Safety
///
/// `SchemaRegistry` is `Send + Sync`. Registration is atomic: of two
/// concurrent registrations binding one ID to different content, exactly one
/// succeeds.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    config: ValidatorConfig,
    resources: RwLock<HashMap<String, Value>>,
}

impl SchemaRegistry {
    /// An empty registry with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty registry with the given settings.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            resources: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.resources.read().is_empty()
    }

    /// Returns true if the document part of `resource_id` is bound.
    pub fn contains(&self, resource_id: &str) -> bool {
        self.resource_uri(resource_id)
            .map(|uri| self.resources.read().contains_key(&uri))
            .unwrap_or(false)
    }

    /// Absolute URI for the document part of `resource_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Registration`] if the ID is empty or contains
    /// whitespace.
    pub fn resource_uri(&self, resource_id: &str) -> Result<String, SchemaError> {
        let (base, _) = split_fragment(resource_id);
        if base.is_empty() || base.chars().any(char::is_whitespace) {
            return Err(SchemaError::Registration {
                resource_id: resource_id.to_string(),
                reason: "resource ID must be a non-empty URI reference without whitespace"
                    .to_string(),
            });
        }
        if base.contains("://") || base.starts_with("urn:") {
            Ok(base.to_string())
        } else {
            Ok(format!("{}{}", self.config.uri_prefix, base.trim_start_matches('/')))
        }
    }

    /// Bind `resource_id` to `schema`, returning the resource URI.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Registration`] if the ID is unusable, the
    /// document is neither an object nor a boolean, or the ID is already
    /// bound to different content.
    pub fn register(&self, resource_id: &str, schema: Value) -> Result<String, SchemaError> {
        let uri = self.resource_uri(resource_id)?;
        check_shape(resource_id, &schema)?;

        let mut resources = self.resources.write();
        if !is_bound(&resources, &uri, resource_id, &schema)? {
            tracing::debug!(%uri, "schema registered");
            resources.insert(uri.clone(), schema);
        }
        Ok(uri)
    }

    /// Parse `schema_bytes`, register them under `resource_id` and compile.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Registration`] if the bytes do not parse or the
    /// registration is rejected, [`SchemaError::Compile`] if the engine
    /// rejects the schema.
    pub fn compile(
        &self,
        schema_bytes: &[u8],
        resource_id: &str,
    ) -> Result<CompiledSchema, SchemaError> {
        let schema =
            pdv_core::parse_document(schema_bytes).map_err(|e| SchemaError::Registration {
                resource_id: resource_id.to_string(),
                reason: format!("schema does not parse: {e}"),
            })?;
        self.compile_value(schema, resource_id)
    }

    /// Compile an already parsed schema and register it under `resource_id`.
    ///
    /// The schema is only bound once the engine accepts it; a failed compile
    /// leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// As for [`SchemaRegistry::compile`].
    pub fn compile_value(
        &self,
        schema: Value,
        resource_id: &str,
    ) -> Result<CompiledSchema, SchemaError> {
        let uri = self.resource_uri(resource_id)?;
        check_shape(resource_id, &schema)?;

        let mut snapshot = self.resources.read().clone();
        if !is_bound(&snapshot, &uri, resource_id, &schema)? {
            snapshot.insert(uri.clone(), schema.clone());
        }
        let target = match split_fragment(resource_id).1 {
            Some(fragment) if !fragment.is_empty() => format!("{uri}#{fragment}"),
            _ => uri,
        };

        let retriever = LocalSchemaRetriever {
            schemas_by_uri: snapshot,
        };
        let validator = jsonschema::options()
            .with_draft(self.config.draft.to_engine())
            .with_retriever(retriever)
            .build(&json!({ "$ref": target }))
            .map_err(|e| SchemaError::Compile {
                resource_id: resource_id.to_string(),
                reason: e.to_string(),
            })?;

        // Another caller may have bound the ID since the snapshot was taken.
        self.register(resource_id, schema)?;
        tracing::debug!(%target, "schema compiled");
        Ok(CompiledSchema {
            resource_id: resource_id.to_string(),
            uri: target,
            validator,
        })
    }

    /// Parse `instance_bytes`, compile `schema_bytes` under `resource_id`,
    /// and validate.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Parse`] for a malformed instance (checked before the
    /// schema is looked at), then the errors of [`SchemaRegistry::compile`]
    /// and [`CompiledSchema::validate`].
    pub fn validate_document(
        &self,
        instance_bytes: &[u8],
        schema_bytes: &[u8],
        resource_id: &str,
    ) -> Result<(), SchemaError> {
        let instance = pdv_core::parse_document(instance_bytes)?;
        let compiled = self.compile(schema_bytes, resource_id)?;
        compiled.validate(&instance)
    }
}

/// Validate `instance` against `compiled`.
///
/// # Errors
///
/// See [`CompiledSchema::validate`].
pub fn validate(instance: &Value, compiled: &CompiledSchema) -> Result<(), SchemaError> {
    compiled.validate(instance)
}

/// One-shot validation with a fresh registry.
///
/// # Errors
///
/// See [`SchemaRegistry::validate_document`].
pub fn validate_document(
    instance_bytes: &[u8],
    schema_bytes: &[u8],
    resource_id: &str,
) -> Result<(), SchemaError> {
    SchemaRegistry::new().validate_document(instance_bytes, schema_bytes, resource_id)
}

fn check_shape(resource_id: &str, schema: &Value) -> Result<(), SchemaError> {
    if schema.is_object() || schema.is_boolean() {
        Ok(())
    } else {
        Err(SchemaError::Registration {
            resource_id: resource_id.to_string(),
            reason: "schema must be a JSON object or boolean".to_string(),
        })
    }
}

/// Whether `uri` is already bound to `schema`; binding it to anything else
/// is a registration error.
fn is_bound(
    resources: &HashMap<String, Value>,
    uri: &str,
    resource_id: &str,
    schema: &Value,
) -> Result<bool, SchemaError> {
    match resources.get(uri) {
        Some(existing) if existing == schema => {
            tracing::debug!(%uri, "schema already registered with identical content");
            Ok(true)
        }
        Some(_) => {
            tracing::warn!(%uri, "rejecting conflicting schema registration");
            Err(SchemaError::Registration {
                resource_id: resource_id.to_string(),
                reason: format!("'{uri}' is already bound to a different schema"),
            })
        }
        None => Ok(false),
    }
}

fn split_fragment(resource_id: &str) -> (&str, Option<&str>) {
    match resource_id.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (resource_id, None),
    }
}
