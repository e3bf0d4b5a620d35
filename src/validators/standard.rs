//! Standard-contract validator backend.
//!
//! Any schema object exposing the universal validate capability can
//! participate: given the raw value it returns either a produced value
//! or a list of issues. The adapter never inspects the implementor
//! beyond this contract, so external validation libraries plug in with
//! a thin trait impl.

use std::collections::BTreeMap;

use crate::error::{EnvErrors, FieldCause, Issue};
use crate::validators::{collect, ResolvedVar};
use crate::value::Value;

/// Outcome of a standard-contract validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StandardResult {
    /// The value produced by the validator. `None` is the absent
    /// sentinel: the key is skipped, contributing neither a success nor
    /// a failure.
    Value(Option<Value>),
    /// The validation issues; the first one's message is reported.
    Issues(Vec<Issue>),
}

impl StandardResult {
    /// A produced value.
    pub fn value(value: impl Into<Value>) -> Self {
        StandardResult::Value(Some(value.into()))
    }

    /// The absent sentinel.
    pub fn skip() -> Self {
        StandardResult::Value(None)
    }

    /// A single-issue failure.
    pub fn failure(message: impl Into<String>) -> Self {
        StandardResult::Issues(vec![Issue::new(message)])
    }
}

/// The universal validate contract.
///
/// # Example
///
/// ```
/// use preflight::validators::{StandardResult, StandardSchema};
///
/// struct PortSchema;
///
/// impl StandardSchema for PortSchema {
///     fn validate(&self, raw: Option<&str>) -> StandardResult {
///         match raw.and_then(|r| r.parse::<u16>().ok()) {
///             Some(port) => StandardResult::value(i64::from(port)),
///             None => StandardResult::failure("Expected a port number"),
///         }
///     }
/// }
/// ```
pub trait StandardSchema: Send + Sync {
    /// Validate the raw value, producing a value or issues.
    fn validate(&self, raw: Option<&str>) -> StandardResult;
}

/// Closures with the contract signature are standard schemas.
impl<F> StandardSchema for F
where
    F: Fn(Option<&str>) -> StandardResult + Send + Sync,
{
    fn validate(&self, raw: Option<&str>) -> StandardResult {
        self(raw)
    }
}

/// Schema for the standard backend: environment key to schema object.
#[derive(Default)]
pub struct StandardSchemas {
    fields: BTreeMap<String, Box<dyn StandardSchema>>,
}

impl StandardSchemas {
    /// Create an empty schema map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema for a key, consuming and returning the map.
    pub fn with(mut self, key: impl Into<String>, schema: impl StandardSchema + 'static) -> Self {
        self.insert(key, schema);
        self
    }

    /// Add a schema for a key.
    pub fn insert(&mut self, key: impl Into<String>, schema: impl StandardSchema + 'static) {
        self.fields.insert(key.into(), Box::new(schema));
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

    /// Iterate over key/schema pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn StandardSchema)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl std::fmt::Debug for StandardSchemas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardSchemas")
            .field("keys", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Validate the environment against standard-contract schemas.
pub(crate) fn validate(
    schemas: &StandardSchemas,
    env: &BTreeMap<String, String>,
) -> Result<Vec<ResolvedVar>, EnvErrors> {
    collect(schemas.iter().map(|(key, schema)| {
        let raw = env.get(key).map(String::as_str);
        let result = match schema.validate(raw) {
            StandardResult::Value(value) => Ok(value),
            StandardResult::Issues(issues) => Err(FieldCause::Issues(issues)),
        };
        (key, result)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// A max-length string schema, standing in for an external library.
    struct MaxLen(usize);

    impl StandardSchema for MaxLen {
        fn validate(&self, raw: Option<&str>) -> StandardResult {
            match raw {
                None => StandardResult::failure("Required"),
                Some(value) if value.len() > self.0 => StandardResult::failure(format!(
                    "String must contain at most {} character(s)",
                    self.0
                )),
                Some(value) => StandardResult::value(value),
            }
        }
    }

    /// Like `MaxLen` but optional: absent input is skipped.
    struct OptionalMaxLen(usize);

    impl StandardSchema for OptionalMaxLen {
        fn validate(&self, raw: Option<&str>) -> StandardResult {
            match raw {
                None => StandardResult::skip(),
                Some(_) => MaxLen(self.0).validate(raw),
            }
        }
    }

    #[test]
    fn test_standard_success() {
        let schemas = StandardSchemas::new().with("APP_NAME", MaxLen(10));
        let entries = validate(&schemas, &env(&[("APP_NAME", "hello")])).unwrap();
        assert_eq!(entries[0].value, Value::String("hello".to_string()));
    }

    #[test]
    fn test_standard_failure_reports_first_issue() {
        let schemas = StandardSchemas::new().with("APP_LONG_STRING", MaxLen(10));
        let errors = validate(&schemas, &env(&[("APP_LONG_STRING", "superlongstring")]))
            .unwrap_err();

        assert_eq!(
            errors.first().message(),
            "Invalid value for \"APP_LONG_STRING\" : String must contain at most 10 character(s)"
        );
    }

    #[test]
    fn test_standard_collects_all_failures() {
        let schemas = StandardSchemas::new()
            .with("APP_A", MaxLen(10))
            .with("APP_B", MaxLen(10));

        let errors = validate(&schemas, &env(&[])).unwrap_err();
        assert_eq!(errors.len(), 2);

        let message = errors.to_string();
        assert!(message.contains("Invalid value for \"APP_A\" : Required"));
        assert!(message.contains("Invalid value for \"APP_B\" : Required"));
    }

    #[test]
    fn test_standard_optional_skip_does_not_stop_validation() {
        let schemas = StandardSchemas::new()
            .with("APP_MY_VAR", MaxLen(10))
            .with("APP_OPTIONAL", OptionalMaxLen(2));

        let entries = validate(&schemas, &env(&[("APP_MY_VAR", "hello")])).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "APP_MY_VAR");
    }

    #[test]
    fn test_standard_optional_present_but_invalid_fails() {
        let schemas = StandardSchemas::new().with("APP_OPTIONAL", OptionalMaxLen(2));
        let errors = validate(&schemas, &env(&[("APP_OPTIONAL", "hello")])).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_standard_closure_schema_with_transform() {
        let schemas = StandardSchemas::new().with("APP_NAME", |raw: Option<&str>| match raw {
            Some(value) => StandardResult::value(value.to_uppercase()),
            None => StandardResult::failure("Required"),
        });

        let entries = validate(&schemas, &env(&[("APP_NAME", "hello")])).unwrap();
        assert_eq!(entries[0].value, Value::String("HELLO".to_string()));
    }

    #[test]
    fn test_standard_default_value_for_missing_key() {
        let schemas = StandardSchemas::new().with("APP_OPTIONAL", |raw: Option<&str>| {
            StandardResult::value(raw.unwrap_or("d"))
        });

        let entries = validate(&schemas, &env(&[])).unwrap();
        assert_eq!(entries[0].value, Value::String("d".to_string()));
    }
}
