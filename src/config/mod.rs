//! Configuration resolution
//!
//! Validates a user configuration against the recognized schema and merges
//! it with the built-in defaults:
//! - `content`: user globs, verbatim
//! - `theme.<key>`: replaces the default category
//! - `theme.extend.<key>`: deep-merged into the default category
//! - `plugins`: user references, in order

mod defaults;
mod effective;
mod error;
mod loader;
mod merge;
mod plugin;
mod schema;

pub use defaults::BuiltinDefaults;
pub use effective::{resolve, ConfigSource, EffectiveConfig, SCHEMA_ID, SCHEMA_VERSION};
pub use error::{LoadError, ResolveError};
pub use loader::{
    find_config, find_config_from, load_config_file, load_defaults_file, load_effective_config,
    parse_config_str, ConfigFormat, LoadedConfig, CONFIG_FILE_NAMES,
};
pub use merge::{merge_scale, merge_theme, merge_token};
pub use plugin::{PluginRef, PluginSpec};
pub use schema::{
    ScaleShape, ThemeConfig, ThemeKey, ThemeScales, TokenScale, TokenValue, UserConfig,
    EXTEND_FIELD, TOP_LEVEL_FIELDS,
};
