//! Configuration management for weekgrid.
//!
//! This module handles the `config.yaml` file which stores the fixed task
//! list shown as grid rows, the cache freshness window, and an optional
//! database path override.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Task names shown as grid rows, in display order.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<String>,

    /// How long a fetched week stays fresh, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Database path override. None means the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { tasks: default_tasks(), cache_ttl_secs: default_cache_ttl_secs(), database: None }
    }
}

fn default_tasks() -> Vec<String> {
    vec!["Exercise".to_string(), "Read".to_string(), "Water plants".to_string()]
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl AppConfig {
    /// Load config from a specific file, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Save config to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// The cache freshness window as a duration.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
