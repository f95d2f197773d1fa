//! Error types for configuration resolution and loading

use serde_json::Value;
use std::io;
use std::path::PathBuf;

use super::loader::{ConfigFormat, CONFIG_FILE_NAMES};

/// Errors raised while validating a user configuration.
///
/// Both variants are fatal: resolution is deterministic, so the only remedy
/// is fixing the configuration itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// A field name that is not part of the recognized schema
    #[error("Schema error: unknown field `{path}`{}", suggestion_suffix(.suggestion))]
    Schema {
        /// Dotted path to the offending field (e.g. `theme.extend.fontFamly`)
        path: String,
        /// The offending field name itself
        field: String,
        /// Closest recognized field name, if any is close enough
        suggestion: Option<String>,
    },

    /// A recognized field holding a value of the wrong shape
    #[error("Type error: `{path}` must be {expected}, found {found}")]
    Type {
        /// Dotted path to the offending value
        path: String,
        /// Human-readable description of the expected shape
        expected: &'static str,
        /// JSON type actually found
        found: &'static str,
    },
}

impl ResolveError {
    pub(crate) fn unknown_field(
        parent: &str,
        field: &str,
        candidates: &[&str],
    ) -> Self {
        ResolveError::Schema {
            path: join_path(parent, field),
            field: field.to_string(),
            suggestion: crate::suggest::suggest(field, candidates).map(str::to_string),
        }
    }

    pub(crate) fn wrong_type(path: &str, expected: &'static str, found: &Value) -> Self {
        ResolveError::Type {
            path: if path.is_empty() {
                "(root)".to_string()
            } else {
                path.to_string()
            },
            expected,
            found: json_type_name(found),
        }
    }

    /// Dotted path of the field this error refers to
    pub fn path(&self) -> &str {
        match self {
            ResolveError::Schema { path, .. } | ResolveError::Type { path, .. } => path,
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{}`?)", name),
        None => String::new(),
    }
}

/// Errors raised while reading a configuration file from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {format} config {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Unsupported config file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("No config file found (looked for {})", CONFIG_FILE_NAMES.join(", "))]
    NotFound,

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Join a parent path and a field name with a dot
pub(crate) fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

/// JSON type name used in type error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
