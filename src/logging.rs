//! Logging initialization.
//!
//! Writes to stderr by default, or to a file without ANSI colors when one is
//! configured. `RUST_LOG` takes precedence over the configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(&config.level);

    match config.file.as_deref() {
        Some(path) => match open_log_file(path) {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init(),
            Err(e) => {
                eprintln!("Warning: Could not open log file {}: {e}", path.display());
                init_stderr_logging(filter);
            }
        },
        None => init_stderr_logging(filter),
    }
}

fn init_stderr_logging(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the `RUST_LOG` filter, or `level` when it is unset or invalid.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
