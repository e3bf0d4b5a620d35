//! Error types for the preflight validation library.
//!
//! Per-key failures are represented as `FieldError` values and collected
//! into an `EnvErrors` aggregate built on stillwater's `NonEmptyVec`, so
//! that a failed validation pass always reports every offending variable
//! in a single error.

use std::fmt;

use stillwater::{NonEmptyVec, Semigroup};
use thiserror::Error;

/// Machine-readable codes carried by schema validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required value is absent from the resolved environment.
    MissingEnvValue,
    /// A value is present but fails coercion or a refinement.
    InvalidEnvValue,
}

impl ErrorCode {
    /// The canonical string form of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingEnvValue => "E_MISSING_ENV_VALUE",
            ErrorCode::InvalidEnvValue => "E_INVALID_ENV_VALUE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by a builtin schema validator for a single key.
///
/// Carries a human-readable message and a machine code. The code is a
/// discriminant for programmatic handling; rendered reports show only
/// the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvError {
    code: ErrorCode,
    message: String,
}

impl EnvError {
    /// Create an error with an explicit code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A required value was absent. Uses the default message unless a
    /// custom one is supplied.
    pub fn missing(key: &str, message: Option<&str>) -> Self {
        let message = message
            .map(str::to_string)
            .unwrap_or_else(|| format!("Missing environment variable \"{}\"", key));
        Self::new(ErrorCode::MissingEnvValue, message)
    }

    /// A value failed coercion or a refinement.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidEnvValue, message)
    }

    /// The machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The human-readable message, without any code prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EnvError {}

/// A single issue reported by a standard-contract validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Human-readable description of the problem.
    pub message: String,
}

impl Issue {
    /// Create an issue from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Backend-specific cause of a per-key failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCause {
    /// A builtin (function-style) validator failed.
    Schema(EnvError),
    /// A standard-contract validator reported issues.
    Issues(Vec<Issue>),
    /// The serde backend failed to parse the value.
    Json(String),
}

/// A failed schema key together with its cause.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The environment variable key that failed.
    pub key: String,
    /// Why it failed.
    pub cause: FieldCause,
}

impl FieldError {
    /// Create a field error.
    pub fn new(key: impl Into<String>, cause: FieldCause) -> Self {
        Self {
            key: key.into(),
            cause,
        }
    }

    /// The displayed message for this failure, code prefix stripped.
    pub fn message(&self) -> String {
        match &self.cause {
            FieldCause::Schema(err) => err.message().to_string(),
            FieldCause::Issues(issues) => {
                let first = issues
                    .first()
                    .map(|issue| issue.message.as_str())
                    .unwrap_or("unknown validation issue");
                format!("Invalid value for \"{}\" : {}", self.key, first)
            }
            FieldCause::Json(message) => {
                format!("Invalid value for \"{}\" : {}", self.key, message)
            }
        }
    }
}

/// A non-empty collection of per-key validation failures.
///
/// Uses `NonEmptyVec` from stillwater to guarantee at least one failure
/// exists, so an "empty aggregate" is unrepresentable.
#[derive(Debug, Clone)]
pub struct EnvErrors(pub NonEmptyVec<FieldError>);

impl EnvErrors {
    /// Create from a single failure.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Try to create from a vec, returning None if empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Get the first failure (always exists).
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the failures in schema iteration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl Semigroup for EnvErrors {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl From<FieldError> for EnvErrors {
    fn from(error: FieldError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for EnvErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl fmt::Display for EnvErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Failed to validate environment variables :")?;
        for error in self.iter() {
            writeln!(f)?;
            writeln!(f, "[{}]:", error.key)?;
            writeln!(f, "  {}", error.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for EnvErrors {}

/// Errors that can cross the orchestrator boundary.
///
/// Exactly one of these terminates an invocation: either the aggregated
/// validation failure, or a configuration-level problem detected before
/// (or instead of) running any validators.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// One or more schema keys failed validation.
    #[error(transparent)]
    Validation(#[from] EnvErrors),

    /// No schema was resolvable from inline options or a config file.
    #[error("Missing configuration for preflight")]
    MissingConfiguration,

    /// A config file requested a validator this crate does not know.
    #[error("Unknown validator \"{0}\"")]
    UnknownValidator(String),

    /// A config file schema cannot be merged into inline options that
    /// use a non-builtin backend.
    #[error("config file schema cannot be merged into non-builtin validator options")]
    SchemaConflict,

    /// A config file was found but could not be read or parsed.
    #[error("failed to load config file {path}: {message}")]
    ConfigFile {
        /// Path of the offending file.
        path: String,
        /// Underlying read/parse error.
        message: String,
    },
}

impl PreflightError {
    /// The aggregated validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&EnvErrors> {
        match self {
            PreflightError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
