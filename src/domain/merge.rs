//! Remote-wins merge of quote collections
//!
//! The remote snapshot always comes first, in the order the remote returned
//! it. Local quotes follow, minus any whose text also appears remotely.
//! Category plays no part in matching: a local quote that shares its text
//! with a remote quote is dropped even when the categories differ.
//!
//! # Examples
//!
//! ```
//! use quotebook::domain::{merge, Quote, QuoteCollection};
//!
//! let local: QuoteCollection = vec![
//!     Quote::new("A", "x").unwrap(),
//!     Quote::new("B", "y").unwrap(),
//! ]
//! .into();
//! let remote: QuoteCollection = vec![Quote::server("B")].into();
//!
//! let outcome = merge(&local, &remote);
//! assert!(outcome.changed);
//! assert_eq!(outcome.merged.as_slice(), &[Quote::server("B"), Quote::new("A", "x").unwrap()]);
//! ```

use crate::domain::QuoteCollection;

/// Result of merging a local collection with a remote snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: QuoteCollection,
    /// Local quotes that survived the merge
    pub kept_local: usize,
    /// Local quotes discarded because the remote has the same text
    pub dropped_local: usize,
    /// `merged` differs element-wise from the local collection
    pub changed: bool,
}

/// Merge `local` into `remote`, remote first.
pub fn merge(local: &QuoteCollection, remote: &QuoteCollection) -> MergeOutcome {
    let mut merged = remote.clone();
    let mut kept_local = 0;

    for quote in local {
        if !remote.iter().any(|r| r.same_text(quote)) {
            merged.push(quote.clone());
            kept_local += 1;
        }
    }

    let changed = merged != *local;

    MergeOutcome {
        merged,
        kept_local,
        dropped_local: local.len() - kept_local,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;

    fn q(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    fn texts(collection: &QuoteCollection) -> Vec<&str> {
        collection.iter().map(|q| q.text.as_str()).collect()
    }

    #[test]
    fn test_remote_replaces_colliding_local() {
        let local: QuoteCollection = vec![q("A", "x"), q("B", "y")].into();
        let remote: QuoteCollection = vec![Quote::server("B")].into();

        let outcome = merge(&local, &remote);

        assert_eq!(
            outcome.merged,
            QuoteCollection::from(vec![Quote::server("B"), q("A", "x")])
        );
        assert!(outcome.changed);
        assert_eq!(outcome.kept_local, 1);
        assert_eq!(outcome.dropped_local, 1);
    }

    #[test]
    fn test_empty_remote_is_unchanged() {
        let local: QuoteCollection = vec![q("A", "x"), q("B", "y")].into();
        let outcome = merge(&local, &QuoteCollection::new());

        assert_eq!(outcome.merged, local);
        assert!(!outcome.changed);
        assert_eq!(outcome.dropped_local, 0);
    }

    #[test]
    fn test_both_empty() {
        let outcome = merge(&QuoteCollection::new(), &QuoteCollection::new());
        assert!(outcome.merged.is_empty());
        assert!(!outcome.changed);
    }

    #[test]
    fn test_remote_duplicates_are_kept() {
        let remote: QuoteCollection = vec![Quote::server("R"), Quote::server("R")].into();
        let outcome = merge(&QuoteCollection::new(), &remote);
        assert_eq!(texts(&outcome.merged), vec!["R", "R"]);
        assert!(outcome.changed);
    }

    #[test]
    fn test_remote_first_then_local_in_order() {
        let local: QuoteCollection = vec![q("L1", "x"), q("R2", "x"), q("L2", "y")].into();
        let remote: QuoteCollection = vec![Quote::server("R1"), Quote::server("R2")].into();

        let outcome = merge(&local, &remote);
        assert_eq!(texts(&outcome.merged), vec!["R1", "R2", "L1", "L2"]);
    }

    #[test]
    fn test_reordering_alone_counts_as_change() {
        let local: QuoteCollection = vec![q("A", "x"), Quote::server("B")].into();
        let remote: QuoteCollection = vec![Quote::server("B")].into();

        let outcome = merge(&local, &remote);
        assert_eq!(texts(&outcome.merged), vec!["B", "A"]);
        assert!(outcome.changed);
    }

    #[test]
    fn test_already_merged_is_unchanged() {
        let local: QuoteCollection = vec![Quote::server("B"), q("A", "x")].into();
        let remote: QuoteCollection = vec![Quote::server("B")].into();

        let outcome = merge(&local, &remote);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_idempotent_with_same_remote() {
        let local: QuoteCollection = vec![q("A", "x"), q("B", "y"), q("C", "z")].into();
        let remote: QuoteCollection = vec![Quote::server("C"), Quote::server("A")].into();

        let first = merge(&local, &remote);
        let second = merge(&first.merged, &remote);

        assert_eq!(second.merged, first.merged);
        assert!(!second.changed);
        assert_eq!(second.dropped_local, remote.len());
    }

    #[test]
    fn test_text_match_is_case_sensitive() {
        let local: QuoteCollection = vec![q("hello", "x")].into();
        let remote: QuoteCollection = vec![Quote::server("Hello")].into();

        let outcome = merge(&local, &remote);
        assert_eq!(texts(&outcome.merged), vec!["Hello", "hello"]);
    }
}
