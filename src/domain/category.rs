//! Category selection and filtering

use crate::domain::{Quote, QuoteCollection};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Persisted form of [`CategoryFilter::All`]
pub const ALL_CATEGORIES: &str = "all";

/// Selected category: every quote, or exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category match
    Exact(String),
}

impl CategoryFilter {
    /// Quotes whose category matches, in collection order
    pub fn filter<'a>(&self, collection: &'a QuoteCollection) -> Vec<&'a Quote> {
        collection.iter().filter(|q| self.matches(q)).collect()
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(category) => quote.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Exact(s.to_string()))
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Exact(category) => f.write_str(category),
        }
    }
}
