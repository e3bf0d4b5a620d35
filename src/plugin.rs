//! The validation orchestrator.
//!
//! `ValidateEnv` ties the pieces together: it loads the environment for
//! a build context, resolves the schema from inline options and the
//! dedicated config file, dispatches the selected validator backend,
//! and returns the validated variables ready for constant substitution.
//!
//! # Example
//!
//! ```no_run
//! use preflight::{BuildContext, ValidateEnv};
//! use preflight::schema::{self, Schema};
//!
//! fn main() -> Result<(), preflight::PreflightError> {
//!     let schema = Schema::new()
//!         .with("APP_PORT", schema::number())
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

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config_file;
use crate::env::{BuildEnv, RealEnv};
use crate::error::PreflightError;
use crate::loader;
use crate::options::{resolve_options, NormalizedOptions, PluginOptions, DEFAULT_CONFIG_STEM};
use crate::report::{log_variables, Reporter, StderrReporter};
use crate::validators::{run_validator, ResolvedVar};
use crate::value::Value;

/// Namespace prepended to keys in the define table.
pub const DEFINE_PREFIX: &str = "env";

/// Default environment key prefix.
pub const DEFAULT_ENV_PREFIX: &str = "APP_";

/// Where and how the host build resolves its environment.
#[derive(Debug, Clone)]
pub struct BuildContext {
    root: PathBuf,
    mode: String,
    env_dir: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl BuildContext {
    /// Create a context for a project root and build mode.
    ///
    /// The mode selects the dotenv file chain (`.env.<mode>` etc.).
    pub fn new(root: impl Into<PathBuf>, mode: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            mode: mode.into(),
            env_dir: None,
            env_prefix: None,
        }
    }

    /// Read dotenv files from a directory other than the root.
    ///
    /// Relative paths resolve against the root.
    pub fn env_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.env_dir = Some(dir.into());
        self
    }

    /// Override the environment key prefix (default `"APP_"`).
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// The directory the dotenv chain is read from.
    fn resolved_env_dir(&self) -> PathBuf {
        match &self.env_dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }
}

/// The validation entry point.
///
/// One instance performs one validation pass; nothing persists across
/// invocations and the process environment is never written to.
pub struct ValidateEnv {
    options: Option<PluginOptions>,
    reporter: Arc<dyn Reporter>,
}

impl ValidateEnv {
    /// Validate using only the dedicated config file as schema source.
    pub fn new() -> Self {
        Self {
            options: None,
            reporter: Arc::new(StderrReporter::new()),
        }
    }

    /// Validate with inline options (a bare schema or a full wrapper).
    pub fn with_options(options: impl Into<PluginOptions>) -> Self {
        Self {
            options: Some(options.into()),
            reporter: Arc::new(StderrReporter::new()),
        }
    }

    /// Route output through a custom reporter.
    pub fn reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Route output through a shared reporter.
    ///
    /// Useful in tests that inspect the reporter after the run.
    pub fn reporter_shared(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Run the validation pass against the real environment.
    pub fn run(self, ctx: &BuildContext) -> Result<ValidatedEnv, PreflightError> {
        self.run_with_env(ctx, &RealEnv::new())
    }

    /// Run the validation pass with a custom environment.
    ///
    /// This enables dependency injection for testing.
    pub fn run_with_env(
        self,
        ctx: &BuildContext,
        env: &dyn BuildEnv,
    ) -> Result<ValidatedEnv, PreflightError> {
        let prefix = ctx.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
        let variables = loader::load_env(env, &ctx.resolved_env_dir(), &ctx.mode, prefix);

        let stem = self
            .options
            .as_ref()
            .map(PluginOptions::config_file_stem)
            .unwrap_or(DEFAULT_CONFIG_STEM)
            .to_string();
        let file = config_file::load_config_file(env, &ctx.root, &stem)?;

        let options = resolve_options(self.options, file)?;
        let entries = validate_and_log(self.reporter.as_ref(), &variables, &options)?;

        Ok(ValidatedEnv { entries })
    }
}

impl Default for ValidateEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the selected backend and emit the debug listing exactly once per
/// outcome: resolved values on success, raw strings on failure.
fn validate_and_log(
    reporter: &dyn Reporter,
    variables: &BTreeMap<String, String>,
    options: &NormalizedOptions,
) -> Result<Vec<ResolvedVar>, PreflightError> {
    match run_validator(&options.validator, variables) {
        Ok(entries) => {
            if options.debug {
                let resolved: Vec<(String, String)> = entries
                    .iter()
                    .map(|entry| (entry.key.clone(), entry.value.to_string()))
                    .collect();
                log_variables(reporter, &resolved);
            }
            Ok(entries)
        }
        Err(errors) => {
            if options.debug {
                // The per-key values are unknown on this path; fall back
                // to the raw environment strings.
                let raw: Vec<(String, String)> = options
                    .validator
                    .keys()
                    .into_iter()
                    .map(|key| {
                        let value = variables
                            .get(key)
                            .cloned()
                            .unwrap_or_else(|| "<unset>".to_string());
                        (key.to_string(), value)
                    })
                    .collect();
                log_variables(reporter, &raw);
            }
            Err(PreflightError::Validation(errors))
        }
    }
}

/// The outcome of a successful validation pass.
#[derive(Debug, Clone)]
pub struct ValidatedEnv {
    entries: Vec<ResolvedVar>,
}

impl ValidatedEnv {
    /// The resolved variables in schema iteration order.
    pub fn entries(&self) -> &[ResolvedVar] {
        &self.entries
    }

    /// Look up a validated value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Number of resolved variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no variables resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The constant-substitution table: `env.<KEY>` mapped to the
    /// JSON-serialized value, so consumers get exact literal injection.
    pub fn define(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|entry| {
                (
                    format!("{}.{}", DEFINE_PREFIX, entry.key),
                    entry.value.to_json_literal(),
                )
            })
            .collect()
    }

    /// The flat mapping from raw key to validated value, for callers
    /// that want programmatic access rather than constant injection.
    pub fn values(&self) -> BTreeMap<String, Value> {
        self.entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }
}
