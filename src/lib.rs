//! Utility CSS Config - configuration resolver for utility-class CSS generators
//!
//! Loads a user configuration (content globs, theme tokens, plugins),
//! validates it against the recognized schema, and merges it with the
//! generator's built-in defaults into the effective configuration the
//! generation engine consumes.

pub mod config;
pub mod suggest;
pub mod watch;

pub use config::{
    resolve, BuiltinDefaults, EffectiveConfig, LoadError, PluginRef, ResolveError, ThemeKey,
    TokenValue, UserConfig,
};
pub use watch::{watch_config, ReloadOutcome, WatchError, WatchOptions};
