//! Application layer - Use cases and orchestration

pub mod add_quote;
pub mod init;
pub mod manage_config;
pub mod store;
pub mod sync;
pub mod transfer;

pub use add_quote::add_quote;
pub use store::QuoteStore;
pub use sync::{SyncReport, SyncService};
pub use transfer::{export_quotes, import_quotes};
