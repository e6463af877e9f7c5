//! Breadth-limited link collection
//!
//! The collector expands the traversal one depth bucket at a time. Pages in a
//! bucket are fetched concurrently, but their links are merged by a single
//! writer in bucket order, so the visited set needs no locking and the output
//! order is the same as a sequential crawl would produce.

use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::pool::fetch_all;
use crate::url::DomainFilter;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use url::Url;

/// Addresses grouped by hop distance from the root
///
/// Bucket 0 holds only the root. Bucket `i + 1` is filled while bucket `i` is
/// expanded and never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalFrontier {
    buckets: Vec<Vec<Url>>,
}

impl TraversalFrontier {
    fn seeded(root: Url) -> Self {
        Self {
            buckets: vec![vec![root]],
        }
    }

    fn push(&mut self, depth: usize, url: Url) {
        while self.buckets.len() <= depth {
            self.buckets.push(Vec::new());
        }
        self.buckets[depth].push(url);
    }

    /// Number of buckets, including empty trailing ones
    pub fn depth_count(&self) -> usize {
        self.buckets.len()
    }

    /// Addresses discovered at exactly `depth` hops
    pub fn bucket(&self, depth: usize) -> &[Url] {
        self.buckets.get(depth).map_or(&[], Vec::as_slice)
    }

    /// All addresses in discovery order, root first
    pub fn flatten(&self) -> Vec<Url> {
        self.buckets.iter().flatten().cloned().collect()
    }

    /// Total number of addresses across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a traversal produced
#[derive(Debug)]
pub struct CollectOutcome {
    /// Discovered addresses by depth
    pub frontier: TraversalFrontier,
    /// Pages fetched while expanding buckets `0..=max_depth`, keyed by address
    pub pages: HashMap<String, FetchedPage>,
    /// Addresses whose fetch failed, with the final error
    pub failures: HashMap<String, FetchError>,
}

impl CollectOutcome {
    /// All collected addresses as strings, in discovery order
    pub fn addresses(&self) -> Vec<String> {
        self.frontier
            .flatten()
            .into_iter()
            .map(|url| url.to_string())
            .collect()
    }
}

/// Runs a bounded breadth-first traversal restricted by a domain filter
pub struct LinkCollector {
    fetcher: Arc<Fetcher>,
    filter: DomainFilter,
    max_concurrent: usize,
}

impl LinkCollector {
    pub fn new(fetcher: Arc<Fetcher>, filter: DomainFilter, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            filter,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Collects every filtered address within `max_depth + 1` hops of `root`
    ///
    /// Buckets `0..=max_depth` are expanded in order; bucket `max_depth + 1`
    /// is collected but never fetched here. The root is always part of the
    /// output, even if it does not pass the domain filter. An address that
    /// cannot be fetched contributes no links and the traversal carries on.
    pub async fn collect(&self, root: Url, max_depth: u32) -> CollectOutcome {
        tracing::info!(
            "Collecting links from {} (max depth {}, suffix {})",
            root,
            max_depth,
            self.filter.suffix()
        );

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(root.to_string());

        let mut frontier = TraversalFrontier::seeded(root);
        let mut pages = HashMap::new();
        let mut failures = HashMap::new();

        for depth in 0..=max_depth as usize {
            let bucket: Vec<String> = frontier
                .bucket(depth)
                .iter()
                .map(|url| url.to_string())
                .collect();

            // Make sure the next bucket exists even if nothing is found
            frontier.buckets.push(Vec::new());

            if bucket.is_empty() {
                tracing::debug!("Depth {} is empty, nothing to expand", depth);
                continue;
            }

            tracing::info!("Expanding depth {} ({} addresses)", depth, bucket.len());
            let outcomes = fetch_all(&self.fetcher, &bucket, self.max_concurrent).await;

            for (address, outcome) in bucket.into_iter().zip(outcomes) {
                match outcome {
                    Some(Ok(page)) => {
                        for link in extract_links(&page.body, &page.final_url) {
                            if !self.filter.accepts(&link) {
                                tracing::trace!("Outside {}: {}", self.filter.suffix(), link);
                                continue;
                            }

                            if visited.insert(link.to_string()) {
                                tracing::debug!("Collected link ({}) {}", visited.len(), link);
                                frontier.push(depth + 1, link);
                            }
                        }
                        pages.insert(address, page);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("Skipping {}: {}", address, e);
                        failures.insert(address, e);
                    }
                    None => {
                        tracing::warn!("Skipping {}: fetch task did not complete", address);
                    }
                }
            }
        }

        tracing::info!(
            "Collected {} addresses ({} fetched, {} failed)",
            frontier.len(),
            pages.len(),
            failures.len()
        );

        CollectOutcome {
            frontier,
            pages,
            failures,
        }
    }
}
