//! Crawler coordinator - builds a corpus from a root address
//!
//! A crawl runs in two passes:
//! - Link collection over depth buckets `0..=max_depth`
//! - Extraction over every collected address, in traversal order
//!
//! Pages fetched during collection are reused for extraction; only the
//! addresses of the last bucket, which collection never expands, are fetched
//! in the second pass. An address that could not be fetched in either pass
//! produces no Document.

use crate::config::Config;
use crate::corpus::{Corpus, Document};
use crate::crawler::collector::LinkCollector;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::pool::fetch_all;
use crate::extract::PageExtractor;
use crate::output::CrawlReport;
use crate::url::{normalize_url, DomainFilter};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;

/// The result of a crawl: the corpus and a summary of how it was built
#[derive(Debug)]
pub struct CrawlOutcome {
    pub corpus: Corpus,
    pub report: CrawlReport,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Arc<Fetcher>,
    collector: LinkCollector,
    extractor: PageExtractor,
    root: String,
    max_depth: u32,
    max_concurrent: usize,
}

impl Coordinator {
    /// Creates a coordinator from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(SearchError)` - The HTTP client or the extraction selectors could not be built
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(&config.fetch)?);
        let filter = DomainFilter::new(&config.crawler.domain_suffix);
        let max_concurrent = config.crawler.max_concurrent_fetches.max(1) as usize;

        Ok(Self {
            collector: LinkCollector::new(Arc::clone(&fetcher), filter, max_concurrent),
            extractor: PageExtractor::new(&config.extract)?,
            fetcher,
            root: config.crawler.root.clone(),
            max_depth: config.crawler.max_depth,
            max_concurrent,
        })
    }

    /// Crawls from the configured root and assembles the corpus
    ///
    /// Fetch failures are logged and skipped; only an unusable root address
    /// fails the whole crawl.
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let started = Instant::now();
        let root = normalize_url(&self.root)?;

        tracing::info!("Starting crawl from {}", root);
        let mut collected = self.collector.collect(root, self.max_depth).await;
        let addresses = collected.addresses();

        // Addresses collection never fetched: the unexpanded last bucket
        let pending: Vec<String> = addresses
            .iter()
            .filter(|a| !collected.pages.contains_key(*a) && !collected.failures.contains_key(*a))
            .cloned()
            .collect();

        if !pending.is_empty() {
            tracing::info!("Fetching {} unexpanded addresses for extraction", pending.len());
            let outcomes = fetch_all(&self.fetcher, &pending, self.max_concurrent).await;

            for (address, outcome) in pending.into_iter().zip(outcomes) {
                match outcome {
                    Some(Ok(page)) => {
                        collected.pages.insert(address, page);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("Skipping {}: {}", address, e);
                        collected.failures.insert(address, e);
                    }
                    None => {
                        tracing::warn!("Skipping {}: fetch task did not complete", address);
                    }
                }
            }
        }

        let mut corpus = Corpus::new();
        for address in &addresses {
            let Some(page) = collected.pages.get(address) else {
                continue;
            };

            let text = self.extractor.document_text(&page.body);
            if text.is_empty() {
                tracing::debug!("No target content at {}", address);
            }

            let index = corpus.push(Document::new(address.clone(), text));
            tracing::debug!("Document {} from {}", index, address);
        }

        let report = CrawlReport {
            addresses: addresses.len(),
            pages_fetched: collected.pages.len(),
            fetch_failures: collected.failures.len(),
            documents: corpus.len(),
            empty_documents: corpus.empty_documents(),
            elapsed: started.elapsed(),
        };
        tracing::info!("Crawl finished: {}", report);

        Ok(CrawlOutcome { corpus, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_from_default_config() {
        let mut config = Config::default();
        config.crawler.root = "https://www.eecs.utk.edu/".to_string();
        assert!(Coordinator::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_root_fails_the_crawl() {
        let mut config = Config::default();
        config.crawler.root = "not a url".to_string();
        let coordinator = Coordinator::new(&config).unwrap();

        assert!(coordinator.run().await.is_err());
    }

    // Crawls against a mock server are covered in tests/crawl_tests.rs
}
