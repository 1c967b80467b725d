//! Server configuration at ~/.config/calbridge/config.toml.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_store() -> String {
    "eventkit".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Global configuration. CLI flags override file values, and every field
/// has a default, so a missing file is fine.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Store shim name (resolves the `calbridge-store-<name>` binary)
    #[serde(default = "default_store")]
    pub store: String,

    /// Timeout for a single store shim call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: default_store(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("calbridge");
        Ok(config_dir.join("config.toml"))
    }

    /// Load from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }
}
