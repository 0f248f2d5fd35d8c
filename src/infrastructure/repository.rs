//! File system repository

use crate::error::{QuotebookError, Result};
use crate::infrastructure::{Config, FileKeyValueStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker directory at the root of every quotebook
pub const QUOTEBOOK_DIR: &str = ".quotebook";

/// Environment variable pointing at a quotebook root
pub const ROOT_ENV: &str = "QUOTEBOOK_ROOT";

/// Abstract repository for quotebook operations
pub trait QuotebookRepository {
    /// Load configuration from .quotebook/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .quotebook/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .quotebook directory exists
    fn is_initialized(&self) -> bool;

    /// Create .quotebook directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of QuotebookRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover quotebook root by walking up from current directory
    /// First checks QUOTEBOOK_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_quotebook_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(QuotebookError::Config(format!(
                    "{} is set to '{}' but no {} directory found. \
                    Run 'quotebook init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    QUOTEBOOK_DIR,
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover quotebook root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_quotebook_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(QuotebookError::NotQuotebookDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Durable key-value store under .quotebook/data
    pub fn data_store(&self) -> FileKeyValueStore {
        FileKeyValueStore::new(self.data_dir())
    }

    fn data_dir(&self) -> PathBuf {
        self.root.join(QUOTEBOOK_DIR).join("data")
    }

    fn has_quotebook_dir(path: &Path) -> bool {
        path.join(QUOTEBOOK_DIR).is_dir()
    }
}

impl QuotebookRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_quotebook_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let quotebook_dir = self.root.join(QUOTEBOOK_DIR);

        if quotebook_dir.exists() {
            return Err(QuotebookError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&quotebook_dir)?;
        fs::create_dir(self.data_dir())?;
        Ok(())
    }
}
