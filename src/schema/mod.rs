//! Primitive schema functions for the builtin validator backend.
//!
//! Each factory (`string`, `number`, `boolean`, `one_of`) returns a small
//! builder implementing [`FieldValidator`]. Validators receive the key and
//! the raw environment string; they either coerce it to a typed [`Value`],
//! yield the absent sentinel (`Ok(None)`) for optional-and-missing keys,
//! or fail with a typed [`EnvError`].
//!
//! # Example
//!
//! ```
//! use preflight::schema::{self, Format, Schema};
//!
//! let schema = Schema::new()
//!     .with("APP_HOST", schema::string().format(Format::Host))
//!     .with("APP_PORT", schema::number().optional())
//!     .with("APP_DEBUG", schema::boolean())
//!     .with("APP_MODE", schema::one_of(["development", "production"]));
//! ```

mod boolean;
mod format;
mod number;
mod one_of;
mod string;

pub use boolean::{boolean, BoolField, BOOLEAN_NEGATIVES, BOOLEAN_POSITIVES};
pub use number::{number, NumberField};
pub use one_of::{one_of, OneOfField};
pub use string::{string, Format, StringField};

use std::collections::BTreeMap;

use crate::error::EnvError;
use crate::value::Value;

/// A single-key validator for the builtin backend.
///
/// Function-style contract: an `Err` marks the value invalid, `Ok(None)`
/// is the absent sentinel (the key contributes nothing to the output),
/// and `Ok(Some(value))` is the coerced result.
pub trait FieldValidator: Send + Sync {
    /// Validate and coerce the raw value for `key`.
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError>;
}

/// Closures with the validator signature are validators.
///
/// This covers fully custom checks, including ones that transform the
/// value:
///
/// ```
/// use preflight::error::EnvError;
/// use preflight::schema::Schema;
/// use preflight::Value;
///
/// let schema = Schema::new().with("APP_URL", |_key: &str, raw: Option<&str>| {
///     let raw = raw.ok_or_else(|| EnvError::missing("APP_URL", None))?;
///     let normalized = if raw.ends_with('/') {
///         raw.to_string()
///     } else {
///         format!("{}/", raw)
///     };
///     Ok(Some(Value::String(normalized)))
/// });
/// ```
impl<F> FieldValidator for F
where
    F: Fn(&str, Option<&str>) -> Result<Option<Value>, EnvError> + Send + Sync,
{
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError> {
        self(key, raw)
    }
}

/// Schema for the builtin backend: environment key to validator.
///
/// Keys iterate in the map's deterministic order; that order drives
/// error aggregation and the debug listing.
#[derive(Default)]
pub struct Schema {
    fields: BTreeMap<String, Box<dyn FieldValidator>>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator for a key, consuming and returning the schema.
    pub fn with(mut self, key: impl Into<String>, validator: impl FieldValidator + 'static) -> Self {
        self.insert(key, validator);
        self
    }

    /// Add a validator for a key.
    pub fn insert(&mut self, key: impl Into<String>, validator: impl FieldValidator + 'static) {
        self.fields.insert(key.into(), Box::new(validator));
    }

    /// Add an already-boxed validator for a key.
    pub fn insert_boxed(&mut self, key: impl Into<String>, validator: Box<dyn FieldValidator>) {
        self.fields.insert(key.into(), validator);
    }

    /// Check whether a key is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
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

    /// Iterate over key/validator pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FieldValidator)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Overlay `other` onto this schema: entries from `other` win on
    /// key collision.
    pub fn extend(&mut self, other: Schema) {
        self.fields.extend(other.fields);
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("keys", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Ensure a required value exists and is non-empty.
///
/// Empty strings count as absent, matching dotenv semantics where
/// `KEY=` declares the key without giving it a value.
pub(crate) fn ensure_value<'a>(
    key: &str,
    raw: Option<&'a str>,
    message: Option<&str>,
) -> Result<&'a str, EnvError> {
    match raw {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(EnvError::missing(key, message)),
    }
}

/// The optional-variant presence check: `None` for absent or empty.
pub(crate) fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}
