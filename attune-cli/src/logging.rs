//! Tracing subscriber setup

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use attune_common::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from the logging config
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to the
/// configured file (appending) or to stderr, keeping stdout for command
/// output.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for_level(&config.level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &config.file {
        Some(path) => {
            let file = open_log_file(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Build a filter from a configured level or directive string
pub fn filter_for_level(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level))
}

/// Open the log file for appending, creating it if missing
pub fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
