//! Bounded concurrent fetching
//!
//! Fetches a batch of addresses with at most `limit` requests in flight and
//! returns the outcomes in the same order as the input, so callers can merge
//! them deterministically.

use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of fetching one address in a batch
pub type FetchOutcome = Result<FetchedPage, FetchError>;

/// Fetches every address concurrently, bounded by a semaphore
///
/// The returned vector is aligned with `addresses`. An entry is `None` only
/// if the task fetching it panicked or was cancelled.
pub async fn fetch_all(
    fetcher: &Arc<Fetcher>,
    addresses: &[String],
    limit: usize,
) -> Vec<Option<FetchOutcome>> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();

    for (position, address) in addresses.iter().enumerate() {
        let fetcher = Arc::clone(fetcher);
        let semaphore = Arc::clone(&semaphore);
        let address = address.clone();

        tasks.spawn(async move {
            // Never closed, so this always yields a permit
            let _permit = semaphore.acquire_owned().await.ok();
            let outcome = fetcher.fetch(&address).await;
            (position, outcome)
        });
    }

    let mut outcomes: Vec<Option<FetchOutcome>> = addresses.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, outcome)) => outcomes[position] = Some(outcome),
            Err(e) => tracing::error!("Fetch task failed: {}", e),
        }
    }

    outcomes
}
