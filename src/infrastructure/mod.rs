//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod remote;
pub mod repository;
pub mod store;

pub use config::Config;
pub use remote::{HttpRemote, RemoteSource};
pub use repository::{FileSystemRepository, QuotebookRepository};
pub use store::{FileKeyValueStore, KeyValueStore, SessionStore};
