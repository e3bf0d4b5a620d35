//! Enum-of-choices schema function.

use crate::error::EnvError;
use crate::value::Value;

use super::boolean::{BOOLEAN_NEGATIVES, BOOLEAN_POSITIVES};
use super::{ensure_value, present, FieldValidator};

/// Enforces the value to be one of the given choices.
///
/// The incoming value is coerced before the membership check:
///
/// - `"0"` and `"false"` become `false`; `"1"` and `"true"` become `true`
/// - strings parsing as numbers become numbers
/// - everything else stays a string
///
/// # Example
///
/// ```
/// use preflight::schema::one_of;
///
/// let mode = one_of(["development", "staging", "production"]);
/// let workers = one_of([1i64, 2, 4]);
/// ```
pub fn one_of<I, T>(choices: I) -> OneOfField
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    OneOfField {
        choices: choices.into_iter().map(Into::into).collect(),
        optional: false,
        message: None,
    }
}

/// Builder for the enum-of-choices schema function.
#[derive(Debug, Clone)]
pub struct OneOfField {
    choices: Vec<Value>,
    optional: bool,
    message: Option<String>,
}

impl OneOfField {
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

impl FieldValidator for OneOfField {
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError> {
        let value = if self.optional {
            match present(raw) {
                Some(value) => value,
                None => return Ok(None),
            }
        } else {
            ensure_value(key, raw, self.message.as_deref())?
        };

        let coerced = coerce(value);
        if self.choices.contains(&coerced) {
            return Ok(Some(coerced));
        }

        let message = self.message.clone().unwrap_or_else(|| {
            let choices = self
                .choices
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "Value for environment variable \"{}\" must be one of \"{}\", instead received \"{}\"",
                key, choices, coerced
            )
        });
        Err(EnvError::invalid(message))
    }
}

/// Boolean-set coercion first, then numeric, then the raw string.
fn coerce(value: &str) -> Value {
    if BOOLEAN_NEGATIVES.contains(&value) {
        return Value::Bool(false);
    }
    if BOOLEAN_POSITIVES.contains(&value) {
        return Value::Bool(true);
    }
    if let Ok(int) = value.parse::<i64>() {
        return Value::Integer(int);
    }
    if let Ok(float) = value.parse::<f64>() {
        if float.is_finite() {
            return Value::Float(float);
        }
    }
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_one_of_strings() {
        let field = one_of(["development", "production"]);
        assert_eq!(
            field.validate("APP_MODE", Some("production")).unwrap(),
            Some(Value::String("production".to_string()))
        );
    }

    #[test]
    fn test_one_of_rejects_non_member() {
        let field = one_of(["development", "production"]);
        let err = field.validate("APP_MODE", Some("staging")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidEnvValue);
        assert_eq!(
            err.message(),
            "Value for environment variable \"APP_MODE\" must be one of \"development,production\", instead received \"staging\""
        );
    }

    #[test]
    fn test_one_of_numeric_coercion() {
        let field = one_of([1i64, 2, 4]);
        assert_eq!(
            field.validate("APP_WORKERS", Some("2")).unwrap(),
            Some(Value::Integer(2))
        );
        assert!(field.validate("APP_WORKERS", Some("3")).is_err());
    }

    #[test]
    fn test_one_of_boolean_coercion_wins_over_numeric() {
        // "1" is in the boolean positive set, so it coerces to true
        // before any numeric parse is attempted.
        let field = one_of([true, false]);
        assert_eq!(
            field.validate("APP_FLAG", Some("1")).unwrap(),
            Some(Value::Bool(true))
        );
        assert_eq!(
            field.validate("APP_FLAG", Some("false")).unwrap(),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn test_one_of_boolean_coercion_can_miss_numeric_choices() {
        // Documented consequence of the coercion order: "1" becomes a
        // boolean, which is not a member of a numeric choice list.
        let field = one_of([1i64, 2]);
        assert!(field.validate("APP_N", Some("1")).is_err());
        assert!(field.validate("APP_N", Some("2")).is_ok());
    }

    #[test]
    fn test_one_of_required_missing() {
        let field = one_of(["a", "b"]);
        let err = field.validate("APP_X", None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingEnvValue);
    }

    #[test]
    fn test_one_of_optional_missing() {
        let field = one_of(["a", "b"]).optional();
        assert_eq!(field.validate("APP_X", None).unwrap(), None);
    }

    #[test]
    fn test_one_of_custom_message() {
        let field = one_of(["a", "b"]).message("pick a or b");
        let err = field.validate("APP_X", Some("c")).unwrap_err();
        assert_eq!(err.message(), "pick a or b");
    }
}
