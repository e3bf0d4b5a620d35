//! Validator backend adapters.
//!
//! One adapter per validator ecosystem: the builtin function-style
//! primitives, the standard validate contract, and the serde JSON
//! backend. The backends differ only in how a single key is checked;
//! they share one collect-all loop, so a failing pass always reports
//! every offending variable in a single aggregated error.

pub(crate) mod builtin;
mod json;
mod standard;

pub use json::{json, json_value, JsonField, JsonSchemas};
pub use standard::{StandardResult, StandardSchema, StandardSchemas};

use std::collections::BTreeMap;

use crate::error::{EnvErrors, FieldCause, FieldError};
use crate::schema::Schema;
use crate::value::Value;

/// A successfully validated environment variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVar {
    /// The environment variable key.
    pub key: String,
    /// The coerced value.
    pub value: Value,
}

/// The schema for one validator backend.
///
/// Dispatch is an explicit match over this union; each variant carries
/// its own schema type, so an unknown backend is unrepresentable in
/// typed code. (Config files name backends by string and get their own
/// selection error at load time.)
pub enum ValidatorOptions {
    /// Builtin function-style validators.
    Builtin(Schema),
    /// Validators conforming to the standard validate contract.
    Standard(StandardSchemas),
    /// Serde-backed JSON parsing validators.
    Serde(JsonSchemas),
}

impl ValidatorOptions {
    /// The keys declared by the schema, in iteration order.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            ValidatorOptions::Builtin(schema) => schema.keys().collect(),
            ValidatorOptions::Standard(schemas) => schemas.keys().collect(),
            ValidatorOptions::Serde(schemas) => schemas.keys().collect(),
        }
    }

    /// Name of the backend, as used in config files and debug output.
    pub fn backend_name(&self) -> &'static str {
        match self {
            ValidatorOptions::Builtin(_) => "builtin",
            ValidatorOptions::Standard(_) => "standard",
            ValidatorOptions::Serde(_) => "serde",
        }
    }
}

impl std::fmt::Debug for ValidatorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorOptions")
            .field("backend", &self.backend_name())
            .field("keys", &self.keys())
            .finish()
    }
}

impl From<Schema> for ValidatorOptions {
    fn from(schema: Schema) -> Self {
        ValidatorOptions::Builtin(schema)
    }
}

impl From<StandardSchemas> for ValidatorOptions {
    fn from(schemas: StandardSchemas) -> Self {
        ValidatorOptions::Standard(schemas)
    }
}

impl From<JsonSchemas> for ValidatorOptions {
    fn from(schemas: JsonSchemas) -> Self {
        ValidatorOptions::Serde(schemas)
    }
}

/// Run the selected backend over the environment mapping.
///
/// Returns every resolved variable, or the aggregate of every per-key
/// failure. Keys whose validator yields the absent sentinel contribute
/// neither.
pub fn run_validator(
    options: &ValidatorOptions,
    env: &BTreeMap<String, String>,
) -> Result<Vec<ResolvedVar>, EnvErrors> {
    match options {
        ValidatorOptions::Builtin(schema) => builtin::validate(schema, env),
        ValidatorOptions::Standard(schemas) => standard::validate(schemas, env),
        ValidatorOptions::Serde(schemas) => json::validate(schemas, env),
    }
}

/// The shared collect-all loop.
///
/// Iterates per-key outcomes in schema order, recording failures without
/// stopping, so a misconfigured environment reports every offending
/// variable in one pass.
pub(crate) fn collect<'a, I>(results: I) -> Result<Vec<ResolvedVar>, EnvErrors>
where
    I: Iterator<Item = (&'a str, Result<Option<Value>, FieldCause>)>,
{
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    for (key, result) in results {
        match result {
            Ok(Some(value)) => entries.push(ResolvedVar {
                key: key.to_string(),
                value,
            }),
            // Absent sentinel: the key is skipped entirely.
            Ok(None) => {}
            Err(cause) => failures.push(FieldError::new(key, cause)),
        }
    }

    match EnvErrors::from_vec(failures) {
        Some(errors) => Err(errors),
        None => Ok(entries),
    }
}
