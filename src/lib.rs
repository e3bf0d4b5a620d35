//! Preflight: build-time environment variable validation.
//!
//! Preflight checks every declared environment variable against a typed
//! schema before your build runs, collecting all failures into one
//! aggregated report instead of stopping at the first. Validated values
//! come back as a constant-substitution table (JSON literals under a
//! fixed namespace) or as a flat typed mapping.
//!
//! # Core Concepts
//!
//! - **Error Accumulation**: a failing pass reports every offending
//!   variable at once, using stillwater's non-empty error collections
//! - **Validator Backends**: builtin primitives, the standard validate
//!   contract for external libraries, and a serde JSON backend
//! - **Schema Sources**: inline options merge with a dedicated config
//!   file (`env.toml`), inline entries winning on collision
//! - **Testable I/O**: dependency injection via the `BuildEnv` trait
//!
//! # Quick Start
//!
//! ```no_run
//! use preflight::prelude::*;
//!
//! fn main() -> Result<(), PreflightError> {
//!     let schema = Schema::new()
//!         .with("APP_PORT", schema::number())
//!         .with("APP_HOST", schema::string().format(Format::Host))
//!         .with("APP_DEBUG", schema::boolean().optional());
//!
//!     let validated = ValidateEnv::with_options(schema)
//!         .run(&BuildContext::new(".", "development"))?;
//!
//!     for (constant, literal) in validated.define() {
//!         println!("cargo:rustc-env={}={}", constant, literal);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A failing pass renders every problem:
//!
//! ```text
//! Failed to validate environment variables :
//!
//! [APP_HOST]:
//!   Missing environment variable "APP_HOST"
//!
//! [APP_PORT]:
//!   Value for environment variable "APP_PORT" must be a number, instead received "soon"
//! ```
//!
//! # Validator Backends
//!
//! The builtin backend covers the common primitives. For anything
//! richer, implement the standard contract:
//!
//! ```
//! use preflight::prelude::*;
//!
//! struct Port;
//!
//! impl StandardSchema for Port {
//!     fn validate(&self, raw: Option<&str>) -> StandardResult {
//!         match raw.and_then(|r| r.parse::<u16>().ok()) {
//!             Some(port) => StandardResult::value(i64::from(port)),
//!             None => StandardResult::failure("Expected a port number"),
//!         }
//!     }
//! }
//!
//! let options = FullOptions::new(StandardSchemas::new().with("APP_PORT", Port));
//! ```
//!
//! JSON-valued variables go through the serde backend:
//!
//! ```
//! use preflight::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Endpoints {
//!     api: String,
//! }
//!
//! let options = FullOptions::new(JsonSchemas::new().with("APP_ENDPOINTS", json::<Endpoints>()));
//! ```
//!
//! # Config File
//!
//! A schema can also live in `env.toml` next to the project root, and
//! merges with inline options (inline wins per key):
//!
//! ```toml
//! APP_NAME = "string"
//! APP_PORT = { type = "number", optional = true }
//! ```
//!
//! # Architecture
//!
//! The crate follows the "pure core, imperative shell" pattern: the
//! coercion, merge, and aggregation logic is pure, and all I/O goes
//! through the [`env::BuildEnv`] trait so tests run against
//! [`env::MockEnv`] without touching the process environment. The
//! orchestrator returns validated values explicitly; it never writes
//! them back into the process environment.
//!
//! # Module Structure
//!
//! - [`plugin`]: `ValidateEnv` orchestrator, `BuildContext`, `ValidatedEnv`
//! - [`schema`]: builtin primitives (`string`, `number`, `boolean`, `one_of`)
//! - [`validators`]: backend adapters and dispatch
//! - [`options`]: option normalization and schema-source merging
//! - [`config_file`]: the dedicated schema file
//! - [`loader`]: dotenv chain + process environment resolution
//! - [`error`]: error taxonomy (`EnvError`, `EnvErrors`, `PreflightError`)
//! - [`report`]: reporter contract, debug listings, colorized rendering
//! - [`env`]: `BuildEnv` trait with `RealEnv`/`MockEnv`

pub mod config_file;
pub mod env;
pub mod error;
pub mod loader;
pub mod options;
pub mod plugin;
pub mod prelude;
pub mod report;
pub mod schema;
pub mod validators;
pub mod value;

// Re-exports for convenience
pub use config_file::FileOptions;
pub use env::{BuildEnv, MockEnv, RealEnv};
pub use error::{
    EnvError, EnvErrors, ErrorCode, FieldCause, FieldError, Issue, PreflightError,
};
pub use options::{FullOptions, NormalizedOptions, PluginOptions};
pub use plugin::{BuildContext, ValidateEnv, ValidatedEnv, DEFAULT_ENV_PREFIX, DEFINE_PREFIX};
pub use report::{ColorOption, MemoryReporter, Reporter, StderrReporter};
pub use schema::{FieldValidator, Format, Schema};
pub use validators::{
    json, json_value, JsonField, JsonSchemas, ResolvedVar, StandardResult, StandardSchema,
    StandardSchemas, ValidatorOptions,
};
pub use value::Value;

// Re-export stillwater types that are commonly used
pub use stillwater::{NonEmptyVec, Semigroup};
