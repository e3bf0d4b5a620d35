//! Number schema function.

use crate::error::EnvError;
use crate::value::Value;

use super::{ensure_value, present, FieldValidator};

/// Enforces the value to be a valid number. Integer-valued strings cast
/// to integers, everything else numeric to floats.
pub fn number() -> NumberField {
    NumberField {
        optional: false,
        message: None,
    }
}

/// Builder for the number schema function.
#[derive(Debug, Clone, Default)]
pub struct NumberField {
    optional: bool,
    message: Option<String>,
}

impl NumberField {
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

impl FieldValidator for NumberField {
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError> {
        let value = if self.optional {
            match present(raw) {
                Some(value) => value,
                None => return Ok(None),
            }
        } else {
            ensure_value(key, raw, self.message.as_deref())?
        };

        cast_to_number(key, value, self.message.as_deref()).map(Some)
    }
}

/// Casts the string to a number, failing on anything non-numeric.
pub(crate) fn cast_to_number(
    key: &str,
    value: &str,
    message: Option<&str>,
) -> Result<Value, EnvError> {
    if let Ok(int) = value.parse::<i64>() {
        return Ok(Value::Integer(int));
    }

    match value.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(Value::Float(float)),
        _ => {
            let message = message.map(str::to_string).unwrap_or_else(|| {
                format!(
                    "Value for environment variable \"{}\" must be a number, instead received \"{}\"",
                    key, value
                )
            });
            Err(EnvError::invalid(message))
        }
    }
}
