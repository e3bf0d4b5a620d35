//! Dedicated schema config file.
//!
//! A schema can live outside the build script in `<root>/<stem>.<ext>`
//! (stem defaults to `env`, so typically `env.toml`). The file declares
//! fields declaratively; entries compile to builtin descriptors and
//! merge with any inline schema.
//!
//! ```toml
//! APP_NAME = "string"
//! APP_PORT = { type = "number", optional = true }
//! APP_MODE = { type = "enum", choices = ["development", "production"] }
//! APP_URL = { type = "string", format = "url", protocol = false }
//! ```
//!
//! The wrapped form nests the fields under `schema` and names the
//! validator, and may set `debug`:
//!
//! ```toml
//! validator = "builtin"
//! debug = true
//!
//! [schema]
//! APP_PORT = "number"
//! ```
//!
//! Form detection follows the historical heuristic: a top-level table
//! with *both* `schema` and `validator` keys is the wrapped form,
//! anything else is a bare schema. Known sharp edge: a bare schema
//! declaring variables literally named `schema` and `validator` will be
//! read as wrapped.

use std::path::Path;

use serde::Deserialize;

use crate::env::BuildEnv;
use crate::error::PreflightError;
use crate::schema::{self, FieldValidator, Format, Schema};

/// File extensions probed for the config file, in priority order.
#[cfg(all(feature = "toml", feature = "json"))]
const EXTENSIONS: [&str; 2] = ["toml", "json"];
#[cfg(all(feature = "toml", not(feature = "json")))]
const EXTENSIONS: [&str; 1] = ["toml"];
#[cfg(all(not(feature = "toml"), feature = "json"))]
const EXTENSIONS: [&str; 1] = ["json"];
#[cfg(all(not(feature = "toml"), not(feature = "json")))]
const EXTENSIONS: [&str; 0] = [];

/// Options loaded from a config file.
#[derive(Debug)]
pub struct FileOptions {
    /// The declared schema, compiled to builtin descriptors.
    pub schema: Schema,
    /// The `debug` flag, when the wrapped form sets it.
    pub debug: Option<bool>,
}

/// Probe for and load the config file under `root`.
///
/// Returns `Ok(None)` when no candidate file exists. Read and parse
/// failures are configuration errors, never validation errors.
pub(crate) fn load_config_file(
    env: &dyn BuildEnv,
    root: &Path,
    stem: &str,
) -> Result<Option<FileOptions>, PreflightError> {
    for ext in EXTENSIONS {
        let path = root.join(format!("{}.{}", stem, ext));
        if !env.file_exists(&path) {
            continue;
        }

        let display = path.display().to_string();
        let content = env
            .read_file(&path)
            .map_err(|err| PreflightError::ConfigFile {
                path: display.clone(),
                message: err.to_string(),
            })?;

        let document = parse_document(ext, &content).map_err(|message| {
            PreflightError::ConfigFile {
                path: display.clone(),
                message,
            }
        })?;

        return from_document(&display, document).map(Some);
    }

    Ok(None)
}

/// Parse file content into a uniform JSON document.
fn parse_document(ext: &str, content: &str) -> Result<serde_json::Value, String> {
    match ext {
        #[cfg(feature = "toml")]
        "toml" => {
            let value: toml::Value = toml::from_str(content).map_err(|err| err.to_string())?;
            serde_json::to_value(value).map_err(|err| err.to_string())
        }
        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|err| err.to_string()),
        other => Err(format!("unsupported config file extension \"{}\"", other)),
    }
}

/// The declarative form of a single field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldSpecDoc {
    /// Shorthand: `APP_NAME = "string"`.
    Shorthand(String),
    /// Detail table with options.
    Detail(FieldSpec),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    optional: bool,
    message: Option<String>,
    format: Option<String>,
    tld: Option<bool>,
    protocol: Option<bool>,
    choices: Option<Vec<serde_json::Value>>,
}

impl From<String> for FieldSpec {
    fn from(kind: String) -> Self {
        Self {
            kind,
            optional: false,
            message: None,
            format: None,
            tld: None,
            protocol: None,
            choices: None,
        }
    }
}

/// Interpret the parsed document as file options.
fn from_document(
    path: &str,
    document: serde_json::Value,
) -> Result<FileOptions, PreflightError> {
    let config_error = |message: String| PreflightError::ConfigFile {
        path: path.to_string(),
        message,
    };

    let serde_json::Value::Object(table) = document else {
        return Err(config_error("expected a table at the top level".to_string()));
    };

    // Wrapped-form heuristic: both keys present at the top level.
    let wrapped = table.contains_key("schema") && table.contains_key("validator");

    let (schema_table, debug) = if wrapped {
        let validator = table
            .get("validator")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| config_error("\"validator\" must be a string".to_string()))?;
        if validator != "builtin" {
            return Err(PreflightError::UnknownValidator(validator.to_string()));
        }

        let schema = match table.get("schema") {
            Some(serde_json::Value::Object(schema)) => schema.clone(),
            _ => return Err(config_error("\"schema\" must be a table".to_string())),
        };
        let debug = table.get("debug").and_then(serde_json::Value::as_bool);
        (schema, debug)
    } else {
        (table, None)
    };

    let mut schema = Schema::new();
    for (key, entry) in schema_table {
        let spec: FieldSpecDoc = serde_json::from_value(entry).map_err(|err| {
            config_error(format!("invalid schema entry for \"{}\": {}", key, err))
        })?;
        let spec = match spec {
            FieldSpecDoc::Shorthand(kind) => FieldSpec::from(kind),
            FieldSpecDoc::Detail(spec) => spec,
        };
        let validator = compile_field(&key, spec).map_err(config_error)?;
        schema.insert_boxed(key, validator);
    }

    Ok(FileOptions { schema, debug })
}

/// Compile a declarative field into a builtin descriptor.
fn compile_field(key: &str, spec: FieldSpec) -> Result<Box<dyn FieldValidator>, String> {
    match spec.kind.as_str() {
        "string" => {
            let mut field = schema::string();
            if spec.optional {
                field = field.optional();
            }
            if let Some(message) = spec.message {
                field = field.message(message);
            }
            if let Some(format) = spec.format.as_deref() {
                field = field.format(parse_format(key, format)?);
            }
            if let Some(tld) = spec.tld {
                field = field.require_tld(tld);
            }
            if let Some(protocol) = spec.protocol {
                field = field.require_protocol(protocol);
            }
            Ok(Box::new(field))
        }
        "number" => {
            let mut field = schema::number();
            if spec.optional {
                field = field.optional();
            }
            if let Some(message) = spec.message {
                field = field.message(message);
            }
            Ok(Box::new(field))
        }
        "boolean" => {
            let mut field = schema::boolean();
            if spec.optional {
                field = field.optional();
            }
            if let Some(message) = spec.message {
                field = field.message(message);
            }
            Ok(Box::new(field))
        }
        "enum" => {
            let choices = spec
                .choices
                .ok_or_else(|| format!("enum entry \"{}\" needs a \"choices\" list", key))?;
            let mut field =
                schema::one_of(choices.into_iter().map(crate::value::Value::from_json));
            if spec.optional {
                field = field.optional();
            }
            if let Some(message) = spec.message {
                field = field.message(message);
            }
            Ok(Box::new(field))
        }
        other => Err(format!(
            "unknown schema type \"{}\" for key \"{}\"",
            other, key
        )),
    }
}

fn parse_format(key: &str, format: &str) -> Result<Format, String> {
    match format {
        "email" => Ok(Format::Email),
        "host" => Ok(Format::Host),
        "url" => Ok(Format::Url),
        other => Err(format!(
            "unknown string format \"{}\" for key \"{}\"",
            other, key
        )),
    }
}
