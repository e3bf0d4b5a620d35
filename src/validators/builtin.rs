//! Builtin validator backend.
//!
//! Single-key step: call the function-style descriptor with the key and
//! raw value. An error is the failure cause, `None` is the absent
//! sentinel.

use std::collections::BTreeMap;

use crate::error::{EnvErrors, FieldCause};
use crate::schema::Schema;
use crate::validators::{collect, ResolvedVar};

/// Validate the environment against a builtin schema.
pub(crate) fn validate(
    schema: &Schema,
    env: &BTreeMap<String, String>,
) -> Result<Vec<ResolvedVar>, EnvErrors> {
    collect(schema.iter().map(|(key, validator)| {
        let raw = env.get(key).map(String::as_str);
        let result = validator.validate(key, raw).map_err(FieldCause::Schema);
        (key, result)
    }))
}
