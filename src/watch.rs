//! Watch mode: re-resolve the configuration whenever its file changes
//!
//! Each change produces a fresh [`EffectiveConfig`]; nothing is patched in
//! place. A reload that fails leaves the previous config in effect.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{load_effective_config, BuiltinDefaults, EffectiveConfig, LoadError};

/// Default debounce window for file events
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Errors that stop watch mode
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(#[source] notify::Error),

    #[error("Failed to watch {}: {source}", .path.display())]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Watch channel error: {0}")]
    Channel(String),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}

/// Options for watch mode
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Config file to watch
    pub config_path: PathBuf,
    /// Debounce window for file events
    pub debounce: Duration,
    /// Defaults every reload is resolved against
    pub defaults: BuiltinDefaults,
}

impl WatchOptions {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            defaults: BuiltinDefaults::default(),
        }
    }
}

/// Result of one reload attempt
#[derive(Debug)]
pub enum ReloadOutcome {
    /// A new effective config is in effect
    Changed,
    /// The file changed but resolves to the same config as before
    Unchanged,
    /// The reload failed; the previous config (if any) stays in effect
    Failed(LoadError),
}

/// Holds the current effective config and replaces it on reload
#[derive(Debug)]
pub struct ConfigReloader {
    path: PathBuf,
    defaults: BuiltinDefaults,
    current: Option<EffectiveConfig>,
    fingerprint: Option<String>,
}

impl ConfigReloader {
    pub fn new(path: impl Into<PathBuf>, defaults: BuiltinDefaults) -> Self {
        Self {
            path: path.into(),
            defaults,
            current: None,
            fingerprint: None,
        }
    }

    /// The config currently in effect
    pub fn current(&self) -> Option<&EffectiveConfig> {
        self.current.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and resolve the file again
    pub fn reload(&mut self) -> ReloadOutcome {
        let config = match load_effective_config(&self.path, &self.defaults) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "config reload failed");
                return ReloadOutcome::Failed(e);
            }
        };

        let fingerprint = match config.fingerprint() {
            Ok(fingerprint) => Some(fingerprint),
            Err(e) => {
                warn!(error = %e, "could not fingerprint effective config");
                None
            }
        };

        if fingerprint.is_some() && fingerprint == self.fingerprint {
            debug!(path = %self.path.display(), "config unchanged");
            // The source digest may still differ (whitespace, comments)
            self.current = Some(config);
            return ReloadOutcome::Unchanged;
        }

        info!(path = %self.path.display(), "config reloaded");
        self.current = Some(config);
        self.fingerprint = fingerprint;
        ReloadOutcome::Changed
    }
}

/// True when a file event concerns the watched config file
pub fn is_config_event(event_path: &Path, config_path: &Path) -> bool {
    match (event_path.file_name(), config_path.file_name()) {
        (Some(event_name), Some(config_name)) => event_name == config_name,
        _ => false,
    }
}

/// Watch the config file and re-resolve it after each change.
///
/// `on_reload` runs once after the initial load and once per relevant change,
/// with the outcome and the config now in effect. Returning
/// `ControlFlow::Break` stops watching. Blocks until then.
pub fn watch_config<F>(options: WatchOptions, mut on_reload: F) -> Result<(), WatchError>
where
    F: FnMut(&ReloadOutcome, Option<&EffectiveConfig>) -> ControlFlow<()>,
{
    if !options.config_path.is_file() {
        return Err(WatchError::ConfigNotFound(options.config_path));
    }

    // Editors often replace files on save, so watch the directory
    let watch_dir = match options.config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(options.debounce, tx).map_err(WatchError::WatcherInit)?;
    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|source| WatchError::WatchPath {
            path: watch_dir.clone(),
            source,
        })?;

    let mut reloader = ConfigReloader::new(&options.config_path, options.defaults);

    let outcome = reloader.reload();
    if on_reload(&outcome, reloader.current()).is_break() {
        return Ok(());
    }

    info!(path = %options.config_path.display(), "watching for changes");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    matches!(e.kind, DebouncedEventKind::Any)
                        && is_config_event(&e.path, &options.config_path)
                });
                if !relevant {
                    continue;
                }

                let outcome = reloader.reload();
                if on_reload(&outcome, reloader.current()).is_break() {
                    return Ok(());
                }
            }
            Ok(Err(error)) => {
                // Non-fatal; keep watching
                warn!(error = ?error, "watch error");
            }
            Err(e) => return Err(WatchError::Channel(e.to_string())),
        }
    }
}
