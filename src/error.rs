//! Error types for quotebook

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the quotebook application
#[derive(Debug, Error)]
pub enum QuotebookError {
    #[error("Not a quotebook directory: {0}")]
    NotQuotebookDirectory(PathBuf),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidImport(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl QuotebookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuotebookError::NotQuotebookDirectory(_) => 2,
            QuotebookError::Validation(_) => 3,
            QuotebookError::InvalidImport(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            QuotebookError::NotQuotebookDirectory(path) => {
                format!(
                    "Not a quotebook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'quotebook init' in this directory to create a new quotebook\n\
                    • Navigate to an existing quotebook directory\n\
                    • Set QUOTEBOOK_ROOT environment variable to your quotebook path",
                    path.display()
                )
            }
            QuotebookError::InvalidImport(msg) => {
                format!(
                    "{}\n\n\
                    Expected a JSON array of quotes, for example:\n\
                    [{{\"text\": \"Stay hungry.\", \"category\": \"Motivation\"}}]",
                    msg
                )
            }
            QuotebookError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: quotebook config sync_interval_secs 120",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using QuotebookError
pub type Result<T> = std::result::Result<T, QuotebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_quotebook_directory_suggestion() {
        let err = QuotebookError::NotQuotebookDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("quotebook init"));
        assert!(msg.contains("QUOTEBOOK_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_invalid_import_shows_expected_shape() {
        let err = QuotebookError::InvalidImport("Invalid JSON structure.".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.starts_with("Invalid JSON structure."));
        assert!(msg.contains("\"category\""));
    }

    #[test]
    fn test_unknown_config_key_example() {
        let err = QuotebookError::Config("Unknown config key: 'foo'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("quotebook config sync_interval_secs"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            QuotebookError::NotQuotebookDirectory(PathBuf::from(".")).exit_code(),
            2
        );
        assert_eq!(QuotebookError::Validation("x".into()).exit_code(), 3);
        assert_eq!(QuotebookError::InvalidImport("x".into()).exit_code(), 4);
        assert_eq!(QuotebookError::Remote("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = QuotebookError::Remote("connection refused".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Remote error: connection refused");
    }
}
