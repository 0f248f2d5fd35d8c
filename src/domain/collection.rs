//! Ordered quote collection

use crate::domain::Quote;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered sequence of quotes.
///
/// Insertion order is preserved and duplicate texts are allowed. Serializes
/// as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteCollection {
    quotes: Vec<Quote>,
}

impl QuoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        self.quotes.extend(quotes);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    /// Distinct categories, sorted ascending
    pub fn categories(&self) -> Vec<String> {
        self.quotes
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<Vec<Quote>> for QuoteCollection {
    fn from(quotes: Vec<Quote>) -> Self {
        QuoteCollection { quotes }
    }
}

impl FromIterator<Quote> for QuoteCollection {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        QuoteCollection {
            quotes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for QuoteCollection {
    type Item = Quote;
    type IntoIter = std::vec::IntoIter<Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
