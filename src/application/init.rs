//! Initialize quotebook use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, QuotebookRepository};
use log::info;
use std::fs;
use std::path::Path;

/// Initialize a new quotebook at the specified path.
pub fn init(path: &Path, remote_url: Option<&str>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let mut config = Config::default();
    if let Some(url) = remote_url {
        config.remote_url = url.to_string();
    }
    repo.save_config(&config)?;

    info!("Initialized quotebook at {}", path.display());
    println!("Initialized quotebook at {}", path.display());
    println!("Remote: {}", config.remote_url);

    Ok(())
}
