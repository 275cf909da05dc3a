//! Log setup for fossnav
//!
//! The TUI owns the terminal, so log output goes to a file that is
//! truncated on every run. Everything else in the crate logs through the
//! `tracing` macros.

use crate::config::AppConfig;
use crate::error::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global file subscriber.
///
/// Returns the path being written to. Calling this twice is harmless; the
/// second subscriber is ignored.
pub fn init(config: &AppConfig) -> Result<PathBuf> {
    init_at(&config.log_file, &config.log_level)
}

/// Install the global file subscriber at an explicit path
pub fn init_at(path: &Path, level: &str) -> Result<PathBuf> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)?;

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    tracing::info!(version = crate::VERSION, "fossnav logging to {}", path.display());
    Ok(path.to_path_buf())
}

/// Write a separator line for readability
pub fn separator(label: &str) {
    tracing::info!("========== {} ==========", label);
}
