//! Boolean schema function.

use crate::error::EnvError;
use crate::value::Value;

use super::{ensure_value, present, FieldValidator};

/// Raw strings recognized as `true`.
pub const BOOLEAN_POSITIVES: [&str; 2] = ["1", "true"];

/// Raw strings recognized as `false`.
pub const BOOLEAN_NEGATIVES: [&str; 2] = ["0", "false"];

/// Enforces the value to be a boolean. Casts the string representation
/// of a boolean to a boolean value.
pub fn boolean() -> BoolField {
    BoolField {
        optional: false,
        message: None,
    }
}

/// Builder for the boolean schema function.
#[derive(Debug, Clone, Default)]
pub struct BoolField {
    optional: bool,
    message: Option<String>,
}

impl BoolField {
    /// Allow the value to be absent.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Override the default error message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl FieldValidator for BoolField {
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError> {
        let value = if self.optional {
            match present(raw) {
                Some(value) => value,
                None => return Ok(None),
            }
        } else {
            ensure_value(key, raw, self.message.as_deref())?
        };

        cast_to_boolean(key, value, self.message.as_deref()).map(Some)
    }
}

/// Casts a string value to a boolean.
pub(crate) fn cast_to_boolean(
    key: &str,
    value: &str,
    message: Option<&str>,
) -> Result<Value, EnvError> {
    if BOOLEAN_POSITIVES.contains(&value) {
        return Ok(Value::Bool(true));
    }

    if BOOLEAN_NEGATIVES.contains(&value) {
        return Ok(Value::Bool(false));
    }

    let message = message.map(str::to_string).unwrap_or_else(|| {
        format!(
            "Value for environment variable \"{}\" must be a boolean, instead received \"{}\"",
            key, value
        )
    });
    Err(EnvError::invalid(message))
}
