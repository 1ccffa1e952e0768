//! Configuration management for PIM.
//!
//! Loads configuration from ${PIM_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default base URL for the particles backend.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client configuration.
///
/// Every field has a default so a missing config file is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the particles backend.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the effective base URL, honoring the `PIM_API_URL` override.
    ///
    /// Resolution order:
    /// 1. `PIM_API_URL` environment variable (if set and non-empty)
    /// 2. `api_base_url` from the config file
    pub fn effective_api_base_url(&self) -> String {
        if let Ok(url) = std::env::var("PIM_API_URL")
            && !url.trim().is_empty()
        {
            return url.trim().trim_end_matches('/').to_string();
        }
        self.api_base_url.trim_end_matches('/').to_string()
    }

    /// Saves only the api_base_url field to the config file.
    ///
    /// Creates the file if it doesn't exist. Preserves existing fields and
    /// comments using toml_edit.
    pub fn save_api_base_url(url: &str) -> Result<()> {
        Self::save_api_base_url_to(&paths::config_path(), url)
    }

    /// Saves only the api_base_url field to a specific config file path.
    pub fn save_api_base_url_to(path: &Path, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["api_base_url"] = value(url);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, doc.to_string())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

pub mod paths {
    //! Path resolution for PIM configuration and data directories.
    //!
    //! PIM_HOME resolution order:
    //! 1. PIM_HOME environment variable (if set)
    //! 2. ~/.config/pim (default)

    use std::path::PathBuf;

    /// Returns the PIM home directory.
    ///
    /// Checks PIM_HOME env var first, falls back to ~/.config/pim
    pub fn pim_home() -> PathBuf {
        if let Ok(home) = std::env::var("PIM_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("pim"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        pim_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        pim_home().join("session.toml")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        pim_home().join("logs")
    }
}
