//! Configuration for the terminal front end

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = ".faq-builder";

/// Settings read from `~/.faq-builder/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where saved documents are kept (one file per storage key)
    pub storage_dir: PathBuf,
    /// Where downloads are written
    pub download_dir: PathBuf,
    pub log_file: PathBuf,
    /// One of error, warn, info, debug, trace, off
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let app_dir = app_dir();
        Self {
            storage_dir: app_dir.join("storage"),
            download_dir: PathBuf::from("."),
            log_file: app_dir.join("faq.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> PathBuf {
        app_dir().join("config.json")
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}

/// The ~/.faq-builder directory, or a relative one when there is no home
fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME))
}
