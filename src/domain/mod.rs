//! Domain layer - Quote records, collections, filtering and merging

pub mod category;
pub mod collection;
pub mod merge;
pub mod quote;

pub use category::{CategoryFilter, ALL_CATEGORIES};
pub use collection::QuoteCollection;
pub use merge::{merge, MergeOutcome};
pub use quote::{Quote, SERVER_CATEGORY};
