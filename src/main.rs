//! Utility CSS Config CLI
//!
//! Entry point for the `ucss-config` command-line tool.

use clap::{Parser, Subcommand};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::error;
use utility_css_config::config::{
    find_config, load_defaults_file, load_effective_config, ThemeKey,
};
use utility_css_config::{
    watch_config, BuiltinDefaults, EffectiveConfig, LoadError, ReloadOutcome, WatchOptions,
};

#[derive(Parser)]
#[command(name = "ucss-config")]
#[command(about = "Validate and resolve utility-class CSS generator configs", version)]
struct Cli {
    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as JSON
    Resolve {
        /// Path to config file (default: nearest tailwind.config.*)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Path to a file replacing the built-in defaults
        #[arg(long, short = 'd')]
        defaults: Option<PathBuf>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Validate the configuration and print a summary
    Check {
        /// Path to config file (default: nearest tailwind.config.*)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Path to a file replacing the built-in defaults
        #[arg(long, short = 'd')]
        defaults: Option<PathBuf>,
    },

    /// Print the built-in defaults as JSON
    Defaults,

    /// Re-resolve the configuration whenever its file changes
    Watch {
        /// Path to config file (default: nearest tailwind.config.*)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Path to a file replacing the built-in defaults
        #[arg(long, short = 'd')]
        defaults: Option<PathBuf>,

        /// Debounce window for file events in milliseconds
        #[arg(long, default_value_t = utility_css_config::watch::DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Resolve {
            config,
            defaults,
            compact,
        } => run_resolve(config, defaults, compact),
        Commands::Check { config, defaults } => run_check(config, defaults),
        Commands::Defaults => run_defaults(),
        Commands::Watch {
            config,
            defaults,
            debounce_ms,
        } => run_watch(config, defaults, debounce_ms),
    }
}

fn run_resolve(config_path: Option<PathBuf>, defaults_path: Option<PathBuf>, compact: bool) {
    let config = load_or_exit(config_path, defaults_path);

    let json = if compact {
        config
            .to_value()
            .map(|value| value.to_string())
    } else {
        config.to_json()
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_check(config_path: Option<PathBuf>, defaults_path: Option<PathBuf>) {
    let config = load_or_exit(config_path, defaults_path);
    print_summary(&config);
}

fn run_defaults() {
    match serde_json::to_string_pretty(&BuiltinDefaults::default().to_value()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_watch(config_path: Option<PathBuf>, defaults_path: Option<PathBuf>, debounce_ms: u64) {
    let path = locate_config_or_exit(config_path);
    let defaults = load_defaults_or_exit(defaults_path.as_deref());

    let options = WatchOptions {
        config_path: path.clone(),
        debounce: Duration::from_millis(debounce_ms),
        defaults,
    };

    println!("Watching {} for changes...", path.display());

    let result = watch_config(options, |outcome, current| {
        match outcome {
            ReloadOutcome::Changed => {
                if let Some(config) = current {
                    print_summary(config);
                }
            }
            ReloadOutcome::Unchanged => println!("Configuration unchanged"),
            ReloadOutcome::Failed(e) => {
                eprintln!("Configuration error: {}", e);
                if current.is_some() {
                    eprintln!("Keeping previous configuration");
                }
            }
        }
        ControlFlow::Continue(())
    });

    if let Err(e) = result {
        error!(error = %e, "watch mode stopped");
        eprintln!("Watch error: {}", e);
        process::exit(1);
    }
}

fn locate_config_or_exit(config_path: Option<PathBuf>) -> PathBuf {
    match config_path.or_else(find_config) {
        Some(path) => path,
        None => {
            eprintln!("Configuration error: {}", LoadError::NotFound);
            process::exit(1);
        }
    }
}

fn load_defaults_or_exit(defaults_path: Option<&Path>) -> BuiltinDefaults {
    match defaults_path {
        Some(path) => match load_defaults_file(path) {
            Ok(defaults) => defaults,
            Err(e) => {
                eprintln!("Defaults error: {}", e);
                process::exit(1);
            }
        },
        None => BuiltinDefaults::default(),
    }
}

fn load_or_exit(config_path: Option<PathBuf>, defaults_path: Option<PathBuf>) -> EffectiveConfig {
    let path = locate_config_or_exit(config_path);
    let defaults = load_defaults_or_exit(defaults_path.as_deref());

    match load_effective_config(&path, &defaults) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn print_summary(config: &EffectiveConfig) {
    if let Some(source) = config.source() {
        println!("Configuration valid: {} ({})", source.path, source.format);
    } else {
        println!("Configuration valid");
    }
    println!();

    if config.content().is_empty() {
        println!("  Content: (none; nothing will be scanned)");
    } else {
        println!("  Content:");
        for glob in config.content() {
            println!("    {}", glob);
        }
    }

    for key in ThemeKey::ALL {
        if let Some(scale) = config.scale(key) {
            let names: Vec<&str> = scale.keys().map(String::as_str).collect();
            println!("  {}: {}", key, names.join(", "));
        }
    }

    if config.plugins().is_empty() {
        println!("  Plugins: (none)");
    } else {
        let names: Vec<&str> = config.plugins().iter().map(|p| p.name()).collect();
        println!("  Plugins: {}", names.join(", "));
    }

    if let Ok(fingerprint) = config.fingerprint() {
        println!("  Fingerprint: {}", fingerprint);
    }
}
