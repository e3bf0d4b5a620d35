//! Convenient re-exports for common preflight usage.
//!
//! ```no_run
//! use preflight::prelude::*;
//!
//! fn main() -> Result<(), PreflightError> {
//!     let schema = Schema::new()
//!         .with("APP_PORT", schema::number())
//!         .with("APP_DEBUG", schema::boolean().optional());
//!
//!     let validated = ValidateEnv::with_options(schema)
//!         .run(&BuildContext::new(".", "development"))?;
//!
//!     println!("{:?}", validated.values());
//!     Ok(())
//! }
//! ```

// ============================================================================
// Orchestrator
// ============================================================================

/// The validation entry point.
pub use crate::plugin::ValidateEnv;

/// Build root, mode, and environment resolution settings.
pub use crate::plugin::BuildContext;

/// The outcome of a successful validation pass.
pub use crate::plugin::ValidatedEnv;

// ============================================================================
// Schema
// ============================================================================

/// Builtin primitive schema functions.
pub use crate::schema::{self, Schema};

/// Trait for builtin single-key validators.
pub use crate::schema::FieldValidator;

/// Format refinements for string values.
pub use crate::schema::Format;

// ============================================================================
// Options
// ============================================================================

/// The wrapped options form.
pub use crate::options::FullOptions;

/// Bare schema or full wrapper.
pub use crate::options::PluginOptions;

// ============================================================================
// Backends
// ============================================================================

/// The universal validate contract and its schema map.
pub use crate::validators::{StandardResult, StandardSchema, StandardSchemas};

/// The serde JSON backend.
pub use crate::validators::{json, json_value, JsonField, JsonSchemas};

/// Backend selection union.
pub use crate::validators::ValidatorOptions;

/// A successfully validated variable.
pub use crate::validators::ResolvedVar;

// ============================================================================
// Errors
// ============================================================================

/// Per-key schema error with machine code.
pub use crate::error::EnvError;

/// Aggregated per-key failures.
pub use crate::error::EnvErrors;

/// Top-level error crossing the orchestrator boundary.
pub use crate::error::PreflightError;

// ============================================================================
// Environment abstractions
// ============================================================================

/// Trait for abstracting I/O operations.
pub use crate::env::BuildEnv;

/// Real environment implementation for production use.
pub use crate::env::RealEnv;

/// Mock environment for testing.
pub use crate::env::MockEnv;

// ============================================================================
// Reporting and values
// ============================================================================

/// Reporter contract and implementations.
pub use crate::report::{ColorOption, MemoryReporter, Reporter, StderrReporter};

/// Validated value representation.
pub use crate::value::Value;
