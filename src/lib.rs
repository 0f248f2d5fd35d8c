//! quotebook - Terminal quote manager
//!
//! Keeps an ordered collection of text/category quotes in a local directory,
//! filters them by category, exports and imports them as JSON and merges
//! them with a remote snapshot where the remote always wins.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::QuotebookError;
