//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI, so log records go to a file in the app
//! data directory. The filter comes from `SPYGLASS_LOG` (same syntax as
//! `RUST_LOG`) and defaults to `info`.

use crate::utils::app_data::get_log_path;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SPYGLASS_LOG";

/// Install the global subscriber writing to the default log file
pub fn init_logging() -> Result<PathBuf> {
    let path = get_log_path()?;
    init_logging_to(&path)?;
    Ok(path)
}

/// Install the global subscriber writing to `path` (appending)
pub fn init_logging_to(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}
