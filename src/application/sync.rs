//! Synchronise the local collection with the remote snapshot

use crate::application::QuoteStore;
use crate::domain::QuoteCollection;
use crate::error::Result;
use crate::infrastructure::{KeyValueStore, RemoteSource};
use log::{error, info};

/// Outcome of one sync pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub remote_count: usize,
    pub kept_local: usize,
    pub dropped_local: usize,
    /// The local collection was replaced and persisted
    pub changed: bool,
    /// The remote could not be reached or parsed; merged against nothing
    pub remote_failed: bool,
}

/// Service running the remote-wins merge against a [`RemoteSource`]
pub struct SyncService<R: RemoteSource> {
    remote: R,
}

impl<R: RemoteSource> SyncService<R> {
    pub fn new(remote: R) -> Self {
        SyncService { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fetch, merge and persist if anything changed.
    ///
    /// Remote failures are logged and treated as an empty snapshot. Only
    /// local persistence errors are returned.
    pub fn run<P: KeyValueStore, S: KeyValueStore>(
        &self,
        store: &mut QuoteStore<P, S>,
    ) -> Result<SyncReport> {
        let (remote, remote_failed) = match self.remote.fetch_quotes() {
            Ok(quotes) => (QuoteCollection::from(quotes), false),
            Err(e) => {
                error!("Error fetching from server: {}", e);
                (QuoteCollection::new(), true)
            }
        };

        let outcome = store.merge_remote(&remote)?;

        if outcome.changed {
            info!(
                "Quotes synced with server: {} remote, {} local kept, {} local replaced",
                remote.len(),
                outcome.kept_local,
                outcome.dropped_local
            );
        } else {
            info!("Quotes already in sync with server");
        }

        Ok(SyncReport {
            remote_count: remote.len(),
            kept_local: outcome.kept_local,
            dropped_local: outcome.dropped_local,
            changed: outcome.changed,
            remote_failed,
        })
    }
}
