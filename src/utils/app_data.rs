use crate::index::IndexOptions;
use crate::session::{SessionOptions, DEFAULT_MAX_QUERY_LEN, DEFAULT_MAX_RESULTS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "spyglass";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "spyglass.log";

/// Tallest result viewport accepted from config
pub const MAX_VIEWPORT_HEIGHT: usize = 200;

/// How keystrokes reach the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Raw keys when stdin and stdout are terminals, lines otherwise
    #[default]
    Auto,
    /// One key at a time (full-screen TUI)
    Raw,
    /// One line at a time
    Line,
}

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Matches kept per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Result rows shown at once
    #[serde(default = "default_viewport_height")]
    pub viewport_height: usize,

    /// Longest query accepted, in characters
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,

    /// Follow symbolic links while indexing
    #[serde(default)]
    pub follow_links: bool,

    /// Skip hidden and git-ignored files while indexing
    #[serde(default)]
    pub respect_ignore_files: bool,

    #[serde(default)]
    pub interaction: InteractionMode,

    /// Colored output in line mode
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_viewport_height() -> usize {
    12
}

fn default_max_query_len() -> usize {
    DEFAULT_MAX_QUERY_LEN
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            viewport_height: default_viewport_height(),
            max_query_len: default_max_query_len(),
            follow_links: false,
            respect_ignore_files: false,
            interaction: InteractionMode::default(),
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit file, or return default if it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Result rows to draw, kept within `1..=MAX_VIEWPORT_HEIGHT`
    pub fn viewport_height(&self) -> usize {
        self.viewport_height.clamp(1, MAX_VIEWPORT_HEIGHT)
    }

    /// Session limits. Results never exceed what one viewport can show.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_results: self.max_results.min(self.viewport_height()),
            max_query_len: self.max_query_len,
        }
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            follow_links: self.follow_links,
            respect_ignore_files: self.respect_ignore_files,
            silent: false,
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the path to the log file
pub fn get_log_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(LOG_FILE))
}

/// Get the application data directory for config and logs
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;
    Ok(app_dir)
}
