//! Export and import of quotes as JSON files

use crate::application::QuoteStore;
use crate::domain::{Quote, QuoteCollection};
use crate::error::{QuotebookError, Result};
use crate::infrastructure::KeyValueStore;
use log::info;
use std::fs;
use std::path::Path;

/// File name used when no export path is given
pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// Pretty-printed JSON array with two-space indentation
pub fn export_json(quotes: &QuoteCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Write every quote to `path`, returning the number written
pub fn export_quotes<P: KeyValueStore, S: KeyValueStore>(
    store: &QuoteStore<P, S>,
    path: &Path,
) -> Result<usize> {
    let json = export_json(store.quotes())?;
    fs::write(path, json)?;

    info!("Exported {} quotes to {}", store.quotes().len(), path.display());
    Ok(store.quotes().len())
}

/// Parse an import payload. Must be a JSON array of quote objects.
pub fn parse_import(contents: &str) -> Result<Vec<Quote>> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|_| QuotebookError::InvalidImport("Invalid JSON file.".to_string()))?;

    if !value.is_array() {
        return Err(QuotebookError::InvalidImport(
            "Invalid JSON structure.".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|_| QuotebookError::InvalidImport("Invalid JSON structure.".to_string()))
}

/// Append every quote in the file at `path`.
///
/// The collection is untouched unless the whole file parses.
pub fn import_quotes<P: KeyValueStore, S: KeyValueStore>(
    store: &mut QuoteStore<P, S>,
    path: &Path,
) -> Result<usize> {
    let contents = fs::read_to_string(path)?;
    let quotes = parse_import(&contents)?;
    let count = store.append(quotes)?;

    info!("Imported {} quotes from {}", count, path.display());
    Ok(count)
}
