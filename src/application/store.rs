//! Quote store: the in-memory collection mirrored to durable storage
//!
//! Every mutation reloads the `quotes` key, applies the change and flushes it
//! back while holding the store lock, so concurrent processes never drop
//! each other's quotes. The last displayed quote lives in the session store
//! and is gone when the session ends.

use crate::domain::{merge, CategoryFilter, MergeOutcome, Quote, QuoteCollection};
use crate::error::Result;
use crate::infrastructure::{KeyValueStore, SessionStore};
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

fn read_quotes<P: KeyValueStore>(persistent: &P) -> Result<QuoteCollection> {
    let Some(raw) = persistent.get(QUOTES_KEY)? else {
        return Ok(QuoteCollection::new());
    };

    match serde_json::from_str::<QuoteCollection>(&raw) {
        Ok(quotes) => Ok(quotes),
        Err(e) => {
            warn!(
                "Stored quotes are not valid JSON ({}); starting with an empty collection",
                e
            );
            Ok(QuoteCollection::new())
        }
    }
}

/// Durable key holding the JSON array of quotes
pub const QUOTES_KEY: &str = "quotes";
/// Durable key holding the selected category as a plain string
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";
/// Session key holding the last displayed quote as JSON
pub const LAST_QUOTE_KEY: &str = "lastQuote";

pub struct QuoteStore<P: KeyValueStore, S: KeyValueStore = SessionStore> {
    quotes: QuoteCollection,
    persistent: P,
    session: S,
}

impl<P: KeyValueStore, S: KeyValueStore> QuoteStore<P, S> {
    /// Load the collection from `persistent`.
    ///
    /// A missing key yields an empty collection. So does unparsable JSON,
    /// which is logged and otherwise ignored.
    pub fn load(persistent: P, session: S) -> Result<Self> {
        let quotes = read_quotes(&persistent)?;
        debug!("Loaded {} quotes", quotes.len());

        Ok(QuoteStore {
            quotes,
            persistent,
            session,
        })
    }

    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    /// Re-read the collection, picking up writes from other processes
    pub fn reload(&mut self) -> Result<()> {
        self.quotes = read_quotes(&self.persistent)?;
        Ok(())
    }

    pub fn add(&mut self, quote: Quote) -> Result<()> {
        self.mutate(|quotes| quotes.push(quote))
    }

    /// Append quotes in order, returning how many were added
    pub fn append(&mut self, quotes: Vec<Quote>) -> Result<usize> {
        let count = quotes.len();
        self.mutate(|current| current.extend(quotes))?;
        Ok(count)
    }

    /// Merge the stored collection with a remote snapshot, remote first.
    ///
    /// The merge runs against the latest persisted collection, so quotes
    /// added elsewhere since this store was loaded are kept.
    pub fn merge_remote(&mut self, remote: &QuoteCollection) -> Result<MergeOutcome> {
        self.mutate(|quotes| {
            let outcome = merge(quotes, remote);
            if outcome.changed {
                *quotes = outcome.merged.clone();
            }
            outcome
        })
    }

    /// Reload, apply `f` and flush, all under the store lock
    fn mutate<T>(&mut self, f: impl FnOnce(&mut QuoteCollection) -> T) -> Result<T> {
        let quotes = &mut self.quotes;
        self.persistent.with_lock(|persistent| {
            *quotes = read_quotes(persistent)?;
            let result = f(quotes);
            let json = serde_json::to_string(quotes)?;
            persistent.set(QUOTES_KEY, &json)?;
            Ok(result)
        })
    }

    /// Persisted category selection, `all` when none was saved
    pub fn selected_category(&self) -> Result<CategoryFilter> {
        Ok(self
            .persistent
            .get(SELECTED_CATEGORY_KEY)?
            .map(|raw| CategoryFilter::from(raw.as_str()))
            .unwrap_or_default())
    }

    pub fn select_category(&mut self, filter: &CategoryFilter) -> Result<()> {
        self.persistent
            .set(SELECTED_CATEGORY_KEY, &filter.to_string())
    }

    /// Record `quote` as the last displayed quote of this session
    pub fn show(&mut self, quote: &Quote) -> Result<()> {
        let json = serde_json::to_string(quote)?;
        self.session.set(LAST_QUOTE_KEY, &json)
    }

    pub fn last_shown(&self) -> Result<Option<Quote>> {
        let Some(raw) = self.session.get(LAST_QUOTE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(quote) => Ok(Some(quote)),
            Err(e) => {
                warn!("Ignoring malformed last quote: {}", e);
                Ok(None)
            }
        }
    }

    /// Show a random quote matching `filter`
    pub fn random(&mut self, filter: &CategoryFilter) -> Result<Option<Quote>> {
        self.random_with(filter, &mut rand::rng())
    }

    pub fn random_with<R: Rng + ?Sized>(
        &mut self,
        filter: &CategoryFilter,
        rng: &mut R,
    ) -> Result<Option<Quote>> {
        let picked = filter.filter(&self.quotes).choose(rng).map(|q| (*q).clone());

        if let Some(quote) = &picked {
            self.show(quote)?;
        }
        Ok(picked)
    }

    /// Persist `filter` as the selection and return the matching quotes.
    ///
    /// The first match, if any, becomes the last displayed quote.
    pub fn apply_filter(&mut self, filter: &CategoryFilter) -> Result<Vec<Quote>> {
        self.select_category(filter)?;

        let matching: Vec<Quote> = filter.filter(&self.quotes).into_iter().cloned().collect();
        if let Some(first) = matching.first() {
            self.show(first)?;
        }
        Ok(matching)
    }
}
