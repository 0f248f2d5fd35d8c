//! Key-value persistence surfaces
//!
//! Two stores share the [`KeyValueStore`] trait: a durable one backed by one
//! file per key, and a session one that only lives as long as the process.

use crate::error::{QuotebookError, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Advisory lock file guarding read-modify-write cycles on a store directory
pub const LOCK_FILE: &str = ".lock";

/// String-keyed storage of string values
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Run `f` with exclusive access to the store across processes.
    ///
    /// Stores with a single owner need no locking.
    fn with_lock<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        f(self)
    }
}

/// Durable store: one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        FileKeyValueStore { dir }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(QuotebookError::Config(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuotebookError::Io(e)),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the target,
    /// then rename it into place.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let tmp_path = self
            .dir
            .join(format!("{}.quotebook-tmp-{}", key, std::process::id()));
        fs::write(&tmp_path, value)?;

        // rename does not overwrite on Windows
        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    /// Holds an exclusive `fd-lock` on `.lock` in the store directory
    fn with_lock<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        let mut lock = fd_lock::RwLock::new(file);
        let _guard = lock.write()?;
        debug!("Acquired store lock in {}", self.dir.display());

        f(self)
    }
}

/// Session-scoped store, dropped with the process
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything stored in this session
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
