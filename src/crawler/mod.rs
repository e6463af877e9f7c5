//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching under a bounded retry policy
//! - HTML link extraction
//! - Depth-bucketed link collection with a bounded worker pool
//! - Overall crawl coordination into a corpus

mod collector;
mod coordinator;
mod fetcher;
mod parser;
mod pool;
mod retry;

pub use collector::{CollectOutcome, LinkCollector, TraversalFrontier};
pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher};
pub use parser::extract_links;
pub use pool::{fetch_all, FetchOutcome};
pub use retry::{RetryPolicy, RetryPredicate};

use crate::config::Config;

/// Runs a complete crawl with the given configuration
///
/// This is the main entry point for building a corpus. It will:
/// 1. Build the HTTP client and retry policy
/// 2. Collect links breadth-first from the root
/// 3. Extract and clean the text of every collected page
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The corpus and a crawl report
/// * `Err(SearchError)` - The crawl could not start
pub async fn crawl(config: &Config) -> crate::Result<CrawlOutcome> {
    Coordinator::new(config)?.run().await
}
