//! User-supplied options and their normalization.
//!
//! Callers hand the orchestrator either a bare builtin schema or a full
//! options wrapper carrying a backend selection, the debug flag, and an
//! optional config-file stem. Normalization resolves this, merges in a
//! schema loaded from the config file, and produces the one immutable
//! options value the rest of the pass runs on.

use crate::config_file::FileOptions;
use crate::error::PreflightError;
use crate::schema::Schema;
use crate::validators::ValidatorOptions;

/// Default source stem for the dedicated config file (`env.toml`).
pub const DEFAULT_CONFIG_STEM: &str = "env";

/// Options accepted by the orchestrator.
///
/// The two forms are explicit variants, so a schema that happens to
/// declare a variable named `SCHEMA` or `VALIDATOR` can never be
/// mistaken for the wrapped form. (Config files are untyped and keep a
/// documented detection heuristic; see the `config_file` module.)
#[derive(Debug)]
pub enum PluginOptions {
    /// A bare builtin schema; validator defaults to the builtin backend.
    Bare(Schema),
    /// The full wrapper with an explicit backend selection.
    Full(FullOptions),
}

impl From<Schema> for PluginOptions {
    fn from(schema: Schema) -> Self {
        PluginOptions::Bare(schema)
    }
}

impl From<FullOptions> for PluginOptions {
    fn from(options: FullOptions) -> Self {
        PluginOptions::Full(options)
    }
}

/// The wrapped options form.
///
/// # Example
///
/// ```
/// use preflight::options::FullOptions;
/// use preflight::schema::{self, Schema};
///
/// let options = FullOptions::new(Schema::new().with("APP_PORT", schema::number()))
///     .debug(true)
///     .config_file("env_schema");
/// ```
#[derive(Debug)]
pub struct FullOptions {
    validator: ValidatorOptions,
    debug: bool,
    config_file: Option<String>,
}

impl FullOptions {
    /// Create options for a validator backend.
    pub fn new(validator: impl Into<ValidatorOptions>) -> Self {
        Self {
            validator: validator.into(),
            debug: false,
            config_file: None,
        }
    }

    /// Enable debug logging of every schema key's resolved value.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the config-file source stem (default `"env"`).
    pub fn config_file(mut self, stem: impl Into<String>) -> Self {
        self.config_file = Some(stem.into());
        self
    }
}

impl PluginOptions {
    /// The config-file stem to probe for.
    pub(crate) fn config_file_stem(&self) -> &str {
        match self {
            PluginOptions::Full(options) => options
                .config_file
                .as_deref()
                .unwrap_or(DEFAULT_CONFIG_STEM),
            PluginOptions::Bare(_) => DEFAULT_CONFIG_STEM,
        }
    }
}

/// Options after normalization and schema-source merging.
///
/// Derived once per invocation and never mutated afterward.
#[derive(Debug)]
pub struct NormalizedOptions {
    /// The backend to dispatch, carrying its schema.
    pub validator: ValidatorOptions,
    /// Whether to log every schema key's resolved value.
    pub debug: bool,
}

/// Combine inline options with a loaded config file.
///
/// Schema merge is key-wise with inline entries winning on collision;
/// file-only keys survive. The file can only contribute builtin
/// descriptors, so a non-empty file schema cannot be merged into
/// inline options that selected a different backend.
pub(crate) fn resolve_options(
    inline: Option<PluginOptions>,
    file: Option<FileOptions>,
) -> Result<NormalizedOptions, PreflightError> {
    match (inline, file) {
        (None, None) => Err(PreflightError::MissingConfiguration),

        (None, Some(file)) => Ok(NormalizedOptions {
            validator: ValidatorOptions::Builtin(file.schema),
            debug: file.debug.unwrap_or(false),
        }),

        (Some(PluginOptions::Bare(schema)), None) => Ok(NormalizedOptions {
            validator: ValidatorOptions::Builtin(schema),
            debug: false,
        }),

        (Some(PluginOptions::Bare(schema)), Some(file)) => Ok(NormalizedOptions {
            validator: ValidatorOptions::Builtin(merge_schemas(schema, file.schema)),
            // The bare form cannot carry the flag, so the file decides.
            debug: file.debug.unwrap_or(false),
        }),

        (Some(PluginOptions::Full(options)), None) => Ok(NormalizedOptions {
            validator: options.validator,
            debug: options.debug,
        }),

        (Some(PluginOptions::Full(options)), Some(file)) => {
            let debug = options.debug || file.debug.unwrap_or(false);
            let validator = match options.validator {
                ValidatorOptions::Builtin(schema) => {
                    ValidatorOptions::Builtin(merge_schemas(schema, file.schema))
                }
                other if file.schema.is_empty() => other,
                _ => return Err(PreflightError::SchemaConflict),
            };
            Ok(NormalizedOptions { validator, debug })
        }
    }
}

/// Key-wise union: inline entries override file entries.
fn merge_schemas(inline: Schema, file: Schema) -> Schema {
    let mut merged = file;
    merged.extend(inline);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use crate::validators::{run_validator, StandardResult, StandardSchemas};
    use crate::value::Value;
    use std::collections::BTreeMap;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_sources_is_missing_configuration() {
        let result = resolve_options(None, None);
        assert!(matches!(result, Err(PreflightError::MissingConfiguration)));
    }

    #[test]
    fn test_bare_defaults_to_builtin_without_debug() {
        let options = resolve_options(
            Some(PluginOptions::Bare(
                Schema::new().with("APP_X", schema::string()),
            )),
            None,
        )
        .unwrap();

        assert_eq!(options.validator.backend_name(), "builtin");
        assert!(!options.debug);
    }

    #[test]
    fn test_file_only() {
        let file = FileOptions {
            schema: Schema::new().with("APP_X", schema::number()),
            debug: Some(true),
        };
        let options = resolve_options(None, Some(file)).unwrap();
        assert_eq!(options.validator.keys(), vec!["APP_X"]);
        assert!(options.debug);
    }

    #[test]
    fn test_inline_overrides_file_on_collision() {
        // Inline declares APP_X as a number; the file declares it as a
        // string and also brings APP_Y.
        let inline = PluginOptions::Bare(Schema::new().with("APP_X", schema::number()));
        let file = FileOptions {
            schema: Schema::new()
                .with("APP_X", schema::string())
                .with("APP_Y", schema::string()),
            debug: None,
        };

        let options = resolve_options(Some(inline), Some(file)).unwrap();
        assert_eq!(options.validator.keys(), vec!["APP_X", "APP_Y"]);

        // Inline's number validator won for APP_X.
        let entries = run_validator(
            &options.validator,
            &env(&[("APP_X", "34"), ("APP_Y", "hello")]),
        )
        .unwrap();
        assert_eq!(entries[0].value, Value::Integer(34));
        assert_eq!(entries[1].value, Value::String("hello".to_string()));
    }

    #[test]
    fn test_full_options_keep_backend_and_debug() {
        let inline = PluginOptions::Full(
            FullOptions::new(Schema::new().with("APP_X", schema::string())).debug(true),
        );
        let options = resolve_options(Some(inline), None).unwrap();
        assert!(options.debug);
        assert_eq!(options.validator.backend_name(), "builtin");
    }

    #[test]
    fn test_file_schema_into_standard_backend_is_a_conflict() {
        let standard =
            StandardSchemas::new().with("APP_X", |_raw: Option<&str>| StandardResult::skip());
        let inline = PluginOptions::Full(FullOptions::new(standard));
        let file = FileOptions {
            schema: Schema::new().with("APP_Y", schema::string()),
            debug: None,
        };

        let result = resolve_options(Some(inline), Some(file));
        assert!(matches!(result, Err(PreflightError::SchemaConflict)));
    }

    #[test]
    fn test_empty_file_schema_does_not_conflict() {
        let standard =
            StandardSchemas::new().with("APP_X", |_raw: Option<&str>| StandardResult::skip());
        let inline = PluginOptions::Full(FullOptions::new(standard));
        let file = FileOptions {
            schema: Schema::new(),
            debug: Some(true),
        };

        let options = resolve_options(Some(inline), Some(file)).unwrap();
        assert_eq!(options.validator.backend_name(), "standard");
        assert!(options.debug);
    }

    #[test]
    fn test_config_file_stem() {
        let bare = PluginOptions::Bare(Schema::new());
        assert_eq!(bare.config_file_stem(), "env");

        let full = PluginOptions::Full(
            FullOptions::new(Schema::new()).config_file("import_env"),
        );
        assert_eq!(full.config_file_stem(), "import_env");
    }
}
