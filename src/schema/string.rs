//! String schema function with optional format refinements.

use crate::error::EnvError;
use crate::value::Value;

use super::format;
use super::{ensure_value, present, FieldValidator};

/// Formats a string value can be refined against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// An email address.
    Email,
    /// A domain name or IP address.
    Host,
    /// A URL; see [`StringField::require_tld`] and
    /// [`StringField::require_protocol`].
    Url,
}

/// Enforces the value to exist and be of type string.
pub fn string() -> StringField {
    StringField {
        optional: false,
        message: None,
        format: None,
        tld: true,
        protocol: true,
    }
}

/// Builder for the string schema function.
#[derive(Debug, Clone)]
pub struct StringField {
    optional: bool,
    message: Option<String>,
    format: Option<Format>,
    tld: bool,
    protocol: bool,
}

impl StringField {
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

    /// Refine the value against a format.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// For `Format::Url`: whether the host must have a TLD.
    /// Defaults to `true`.
    pub fn require_tld(mut self, tld: bool) -> Self {
        self.tld = tld;
        self
    }

    /// For `Format::Url`: whether the value must start with a protocol.
    /// Defaults to `true`.
    pub fn require_protocol(mut self, protocol: bool) -> Self {
        self.protocol = protocol;
        self
    }
}

impl FieldValidator for StringField {
    fn validate(&self, key: &str, raw: Option<&str>) -> Result<Option<Value>, EnvError> {
        let value = if self.optional {
            match present(raw) {
                Some(value) => value,
                None => return Ok(None),
            }
        } else {
            ensure_value(key, raw, self.message.as_deref())?
        };

        match self.format {
            Some(Format::Email) => format::check_email(key, value, self.message.as_deref())?,
            Some(Format::Host) => format::check_host(key, value, self.message.as_deref())?,
            Some(Format::Url) => format::check_url(
                key,
                value,
                self.tld,
                self.protocol,
                self.message.as_deref(),
            )?,
            None => {}
        }

        Ok(Some(Value::String(value.to_string())))
    }
}
