//! Add quote use case

use crate::application::QuoteStore;
use crate::domain::Quote;
use crate::error::Result;
use crate::infrastructure::{KeyValueStore, RemoteSource};
use log::{error, info};

/// Validate and store a new quote, then publish it to `remote`.
///
/// Publishing is fire-and-forget: the reply is logged and a failure never
/// undoes the local add.
pub fn add_quote<P: KeyValueStore, S: KeyValueStore>(
    store: &mut QuoteStore<P, S>,
    remote: Option<&dyn RemoteSource>,
    text: &str,
    category: &str,
) -> Result<Quote> {
    let quote = Quote::new(text, category)?;

    store.add(quote.clone())?;
    store.show(&quote)?;

    if let Some(remote) = remote {
        match remote.post_quote(&quote) {
            Ok(reply) => info!("Posted quote to server: {}", reply),
            Err(e) => error!("Failed to post quote to server: {}", e),
        }
    }

    Ok(quote)
}
