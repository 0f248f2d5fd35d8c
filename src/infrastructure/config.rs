//! Configuration management

use crate::error::{QuotebookError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Endpoint the original quote feed was served from
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Environment variable that overrides `remote_url` at runtime
pub const REMOTE_URL_ENV: &str = "QUOTEBOOK_REMOTE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub remote_url: String,
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_post_new_quotes")]
    pub post_new_quotes: bool,
    pub created: DateTime<Utc>,
}

fn default_sync_interval_secs() -> u64 {
    60
}

fn default_fetch_limit() -> usize {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_post_new_quotes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            sync_interval_secs: default_sync_interval_secs(),
            fetch_limit: default_fetch_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            post_new_quotes: default_post_new_quotes(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .quotebook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".quotebook").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                QuotebookError::NotQuotebookDirectory(path.to_path_buf())
            } else {
                QuotebookError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| QuotebookError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .quotebook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let quotebook_dir = path.join(".quotebook");
        let config_path = quotebook_dir.join("config.toml");

        if !quotebook_dir.exists() {
            fs::create_dir(&quotebook_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| QuotebookError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the remote URL, checking the environment first
    pub fn effective_remote_url(&self) -> String {
        std::env::var(REMOTE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.remote_url.clone())
    }
}
