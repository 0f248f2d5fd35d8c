//! Config management use case

use crate::error::{QuotebookError, Result};
use crate::infrastructure::{Config, FileSystemRepository, QuotebookRepository};
use std::str::FromStr;

const VALID_KEYS: &str =
    "remote_url, sync_interval_secs, fetch_limit, request_timeout_secs, post_new_quotes, created";

/// Service for managing quotebook configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "remote_url" => Ok(config.remote_url),
            "sync_interval_secs" => Ok(config.sync_interval_secs.to_string()),
            "fetch_limit" => Ok(config.fetch_limit.to_string()),
            "request_timeout_secs" => Ok(config.request_timeout_secs.to_string()),
            "post_new_quotes" => Ok(config.post_new_quotes.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(QuotebookError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "remote_url" => {
                if value.trim().is_empty() {
                    return Err(QuotebookError::Config(
                        "remote_url cannot be empty".to_string(),
                    ));
                }
                config.remote_url = value.trim().to_string();
            }
            "sync_interval_secs" => {
                let secs: u64 = parse_value(key, value)?;
                if secs == 0 {
                    return Err(QuotebookError::Config(
                        "sync_interval_secs must be at least 1".to_string(),
                    ));
                }
                config.sync_interval_secs = secs;
            }
            "fetch_limit" => config.fetch_limit = parse_value(key, value)?,
            "request_timeout_secs" => config.request_timeout_secs = parse_value(key, value)?,
            "post_new_quotes" => config.post_new_quotes = parse_value(key, value)?,
            "created" => {
                return Err(QuotebookError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(QuotebookError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| QuotebookError::Config(format!("Invalid value for {}: '{}'", key, value)))
}
