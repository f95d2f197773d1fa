//! Effective configuration
//!
//! The effective config is the merged result the generation engine reads:
//! user content and plugins verbatim, and the theme produced by combining
//! the user theme with the built-in defaults. It is read-only once built.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::defaults::BuiltinDefaults;
use super::error::ResolveError;
use super::loader::ConfigFormat;
use super::merge::merge_theme;
use super::plugin::PluginRef;
use super::schema::{scales_to_value, ThemeKey, ThemeScales, TokenScale, TokenValue, UserConfig};

/// Schema version for effective_config
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "utility-css-config/effective_config@1";

/// The file a configuration was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSource {
    /// File path as given to the loader
    pub path: String,

    pub format: ConfigFormat,

    /// SHA-256 digest of raw file bytes
    pub digest: String,
}

/// Merged configuration consumed by the generation engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    schema_version: u32,
    schema_id: String,
    content: Vec<String>,
    theme: ThemeScales,
    plugins: Vec<PluginRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<ConfigSource>,
}

/// The parts of an effective config that determine its fingerprint
#[derive(Serialize)]
struct FingerprintInput<'a> {
    content: &'a [String],
    theme: Value,
    plugins: &'a [PluginRef],
}

impl EffectiveConfig {
    /// Merge a validated user config with defaults.
    ///
    /// Content and plugins are taken from the user as given; defaults only
    /// contribute theme categories.
    pub fn resolve(user: &UserConfig, defaults: &BuiltinDefaults) -> Self {
        debug!(
            content = user.content.len(),
            replaced = user.theme.overrides.len(),
            extended = user.theme.extend.len(),
            plugins = user.plugins.len(),
            "resolving configuration"
        );

        if user.content.is_empty() {
            warn!("content is empty; no source files will be scanned for class names");
        }

        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            content: user.content.clone(),
            theme: merge_theme(&defaults.theme, &user.theme),
            plugins: user.plugins.clone(),
            source: None,
        }
    }

    /// Record the file this config was loaded from
    pub fn with_source(mut self, source: ConfigSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Content globs in the order given
    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn theme(&self) -> &ThemeScales {
        &self.theme
    }

    /// Plugin references in load order
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    pub fn source(&self) -> Option<&ConfigSource> {
        self.source.as_ref()
    }

    /// Resolved scale for one category
    pub fn scale(&self, key: ThemeKey) -> Option<&TokenScale> {
        self.theme.get(&key)
    }

    /// Get a theme token by path (dot-separated), e.g. `fontFamily.sans`
    /// or `colors.gray.500`
    pub fn get(&self, path: &str) -> Option<&TokenValue> {
        let mut parts = path.split('.');
        let key = ThemeKey::from_name(parts.next()?)?;
        let scale = self.theme.get(&key)?;

        let mut current = scale.get(parts.next()?)?;
        for part in parts {
            current = current.as_group()?.get(part)?;
        }
        Some(current)
    }

    /// Get a token as a font-family stack
    pub fn get_stack(&self, path: &str) -> Option<&[String]> {
        self.get(path).and_then(TokenValue::as_stack)
    }

    /// Get a token as a string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(TokenValue::as_str)
    }

    /// Serialize to JSON (pretty printed)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// SHA-256 over the JCS (RFC 8785) form of content, theme and plugins.
    ///
    /// The source file is excluded, so two files that resolve to the same
    /// result share a fingerprint.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let input = FingerprintInput {
            content: &self.content,
            theme: scales_to_value(&self.theme),
            plugins: &self.plugins,
        };
        let jcs_bytes = serde_json_canonicalizer::to_vec(&input)?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Validate a raw user configuration and merge it with defaults.
///
/// Fails with [`ResolveError::Schema`] on unknown field names and
/// [`ResolveError::Type`] on wrongly shaped values.
pub fn resolve(user: &Value, defaults: &BuiltinDefaults) -> Result<EffectiveConfig, ResolveError> {
    let user = UserConfig::from_value(user)?;
    Ok(EffectiveConfig::resolve(&user, defaults))
}
