//! Quote record

use crate::error::{QuotebookError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to quotes pulled from the remote source
pub const SERVER_CATEGORY: &str = "Server";

/// A single text/category pair.
///
/// Quotes are never edited in place. Two quotes are the "same quote" for
/// merge purposes when their `text` is equal; see [`Quote::same_text`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Build a quote from user input.
    ///
    /// Both fields are trimmed and must be non-empty afterwards.
    pub fn new(text: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() || category.is_empty() {
            return Err(QuotebookError::Validation(
                "Both quote and category are required.".to_string(),
            ));
        }

        Ok(Quote {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Build a quote from a remote post title
    pub fn server(title: impl Into<String>) -> Self {
        Quote {
            text: title.into(),
            category: SERVER_CATEGORY.to_string(),
        }
    }

    /// Exact, case-sensitive comparison of the quote text only
    pub fn same_text(&self, other: &Quote) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.category)
    }
}
