//! Configuration file loading and discovery
//!
//! Reads a user configuration from disk into a JSON value, recording the
//! file path, format and digest. Supported formats are JSON, JSON5, TOML
//! and JS modules whose export is a plain object literal.

use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::defaults::BuiltinDefaults;
use super::effective::{ConfigSource, EffectiveConfig};
use super::error::LoadError;
use super::schema::UserConfig;

/// File names probed during discovery, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.json",
    "tailwind.config.json5",
    "tailwind.config.toml",
];

/// On-disk format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Json5,
    Toml,
    /// `module.exports = { ... }` or `export default { ... }`
    Module,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "json5" => Some(ConfigFormat::Json5),
            "toml" => Some(ConfigFormat::Toml),
            "js" | "cjs" | "mjs" => Some(ConfigFormat::Module),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Json5 => "json5",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Module => "module",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw configuration value plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub value: Value,
    pub source: ConfigSource,
}

/// Find a config file by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_from(&cwd)
}

/// Find a config file by walking up from `start`.
///
/// In each directory the names in [`CONFIG_FILE_NAMES`] are tried in order.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Read and parse a configuration file without validating it.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig, LoadError> {
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let parse_error = |message: String| LoadError::Parse {
        path: path.to_path_buf(),
        format,
        message,
    };

    let contents =
        String::from_utf8(bytes).map_err(|e| parse_error(format!("Invalid UTF-8: {}", e)))?;
    let value = parse_config_str(&contents, format).map_err(parse_error)?;

    debug!(path = %path.display(), %format, %digest, "loaded config file");

    Ok(LoadedConfig {
        value,
        source: ConfigSource {
            path: path.to_string_lossy().to_string(),
            format,
            digest,
        },
    })
}

/// Load, validate and resolve a configuration file against defaults.
pub fn load_effective_config(
    path: &Path,
    defaults: &BuiltinDefaults,
) -> Result<EffectiveConfig, LoadError> {
    let loaded = load_config_file(path)?;
    let user = UserConfig::from_value(&loaded.value)?;

    info!(
        path = %path.display(),
        content = user.content.len(),
        plugins = user.plugins.len(),
        "resolved configuration"
    );

    Ok(EffectiveConfig::resolve(&user, defaults).with_source(loaded.source))
}

/// Load replacement defaults from a file of the same formats.
pub fn load_defaults_file(path: &Path) -> Result<BuiltinDefaults, LoadError> {
    let loaded = load_config_file(path)?;
    Ok(BuiltinDefaults::from_value(&loaded.value)?)
}

/// Parse configuration text in the given format into a JSON value.
pub fn parse_config_str(contents: &str, format: ConfigFormat) -> Result<Value, String> {
    match format {
        ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Json5 => json5::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str::<toml::Value>(contents)
            .map(toml_to_json)
            .map_err(|e| e.to_string()),
        ConfigFormat::Module => parse_module(contents),
    }
}

/// Parse the object literal exported by a JS config module.
///
/// `require("pkg")` calls are replaced by the string `"pkg"` so plugin
/// references survive as module specifiers. Anything beyond a plain
/// literal (variables, function calls, spreads) is a parse error.
fn parse_module(contents: &str) -> Result<Value, String> {
    let literal = extract_module_literal(contents)?;

    let require_re = Regex::new(r#"require\(\s*['"](?P<spec>[^'"]+)['"]\s*\)"#)
        .map_err(|e| e.to_string())?;
    let literal = require_re.replace_all(literal, "\"${spec}\"");

    json5::from_str(&literal).map_err(|e| e.to_string())
}

/// Slice out the exported object literal from module source.
///
/// The export must start a line, so mentions in comments or strings are
/// skipped. A trailing `satisfies <Type>` annotation is dropped.
fn extract_module_literal(contents: &str) -> Result<&str, String> {
    let export_re = Regex::new(r"(?m)^[ \t]*(?:module\.exports[ \t]*=|export[ \t]+default\b)")
        .map_err(|e| e.to_string())?;
    let export = export_re
        .find(contents)
        .ok_or_else(|| "no `module.exports =` or `export default` statement found".to_string())?;

    let mut literal = contents[export.end()..].trim().trim_end_matches(';').trim_end();

    let satisfies_re =
        Regex::new(r"\s+satisfies\s+[A-Za-z_$][\w$.]*(?:<[^<>]*>)?$").map_err(|e| e.to_string())?;
    if let Some(annotation) = satisfies_re.find(literal) {
        literal = literal[..annotation.start()].trim_end();
    }

    if literal.is_empty() {
        return Err("exported value is empty".to_string());
    }
    Ok(literal)
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}
