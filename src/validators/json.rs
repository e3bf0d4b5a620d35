//! Serde validator backend.
//!
//! Descriptors parse the raw environment string as a JSON document,
//! either into a caller-chosen type (`json::<T>()`) or as free-form
//! JSON (`json_value()`). Serde's own error message becomes the failure
//! cause, so malformed documents report the position of the problem.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{EnvError, EnvErrors, FieldCause};
use crate::validators::{collect, ResolvedVar};
use crate::value::Value;

type ParseFn = Box<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// A serde-backed descriptor for a single key.
pub struct JsonField {
    parse: ParseFn,
    optional: bool,
}

impl JsonField {
    /// Allow the value to be absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl std::fmt::Debug for JsonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonField")
            .field("optional", &self.optional)
            .finish()
    }
}

/// Parse the raw value as a JSON document deserializing to `T`.
///
/// The value is validated by round-tripping through `T`, so unknown
/// fields, wrong shapes, and type mismatches all fail with serde's
/// diagnostics.
///
/// # Example
///
/// ```
/// use preflight::validators::{json, JsonSchemas};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Endpoints {
///     api: String,
///     assets: String,
/// }
///
/// let schemas = JsonSchemas::new().with("APP_ENDPOINTS", json::<Endpoints>());
/// ```
pub fn json<T>() -> JsonField
where
    T: DeserializeOwned + Serialize,
{
    JsonField {
        parse: Box::new(|raw| {
            let typed: T = serde_json::from_str(raw).map_err(|err| err.to_string())?;
            let value = serde_json::to_value(typed).map_err(|err| err.to_string())?;
            Ok(Value::from_json(value))
        }),
        optional: false,
    }
}

/// Parse the raw value as free-form JSON.
pub fn json_value() -> JsonField {
    JsonField {
        parse: Box::new(|raw| {
            serde_json::from_str::<serde_json::Value>(raw)
                .map(Value::from_json)
                .map_err(|err| err.to_string())
        }),
        optional: false,
    }
}

/// Schema for the serde backend: environment key to JSON descriptor.
#[derive(Debug, Default)]
pub struct JsonSchemas {
    fields: BTreeMap<String, JsonField>,
}

impl JsonSchemas {
    /// Create an empty schema map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor for a key, consuming and returning the map.
    pub fn with(mut self, key: impl Into<String>, field: JsonField) -> Self {
        self.insert(key, field);
        self
    }

    /// Add a descriptor for a key.
    pub fn insert(&mut self, key: impl Into<String>, field: JsonField) {
        self.fields.insert(key.into(), field);
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over declared keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over key/descriptor pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Validate the environment against serde descriptors.
pub(crate) fn validate(
    schemas: &JsonSchemas,
    env: &BTreeMap<String, String>,
) -> Result<Vec<ResolvedVar>, EnvErrors> {
    collect(schemas.iter().map(|(key, field)| {
        let raw = env.get(key).map(String::as_str).filter(|v| !v.is_empty());
        let result = match raw {
            None if field.optional => Ok(None),
            None => Err(FieldCause::Schema(EnvError::missing(key, None))),
            Some(raw) => (field.parse)(raw).map(Some).map_err(FieldCause::Json),
        };
        (key, result)
    }))
}
