//! Search engine facade
//!
//! Ties the crawler, the corpus store and the TF-IDF index together behind the
//! three operations a front-end needs: `train`, `handle_query` and `reset`.

use crate::config::Config;
use crate::corpus::{Corpus, DocumentIndex};
use crate::crawler::Coordinator;
use crate::index::{QueryEngine, TfIdfIndex};
use crate::output::{CorpusStatistics, CrawlReport};
use crate::storage::CorpusStore;
use crate::{Result, SearchError};

/// One ranked result, ready for presentation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// 1-based position in the result list
    pub rank: usize,
    pub index: DocumentIndex,
    pub address: String,
    pub score: f64,
}

/// Crawl-backed search over a stored corpus
pub struct SearchEngine<S: CorpusStore> {
    config: Config,
    store: S,
    corpus: Option<Corpus>,
    index: Option<TfIdfIndex>,
    last_report: Option<CrawlReport>,
}

impl<S: CorpusStore> SearchEngine<S> {
    /// Creates an untrained engine; call [`SearchEngine::train`] before querying
    pub fn new(config: Config, store: S) -> Self {
        Self {
            config,
            store,
            corpus: None,
            index: None,
            last_report: None,
        }
    }

    /// Builds the index, crawling first when the store holds no corpus
    ///
    /// A freshly crawled corpus is saved only after an index was fitted on
    /// it, so an empty crawl is never persisted and the next call crawls again.
    /// The corpus and index in memory are replaced together once every step
    /// has succeeded; on error the engine keeps answering from the previous pair.
    ///
    /// # Errors
    ///
    /// * `SearchError::Index` - the corpus is empty or has no indexable terms
    /// * `SearchError::Storage` - the store could not be read or written
    pub async fn train(&mut self) -> Result<()> {
        let (corpus, crawled) = match self.store.load()? {
            Some(corpus) => {
                tracing::info!("Training on stored corpus of {} documents", corpus.len());
                (corpus, false)
            }
            None => {
                tracing::info!("No stored corpus, crawling {}", self.config.crawler.root);
                let outcome = Coordinator::new(&self.config)?.run().await?;
                self.last_report = Some(outcome.report);
                (outcome.corpus, true)
            }
        };

        let index = TfIdfIndex::fit(&corpus)?;
        if crawled {
            self.store.save(&corpus)?;
        }

        tracing::info!(
            "Index ready: {} documents, {} terms",
            index.document_count(),
            index.vocabulary().len()
        );
        self.corpus = Some(corpus);
        self.index = Some(index);
        Ok(())
    }

    /// Ranks the corpus against a query
    ///
    /// Returns at most `max-results` hits, all with a strictly positive score,
    /// best first. A query matching nothing yields an empty list.
    ///
    /// # Errors
    ///
    /// * `SearchError::NotTrained` - no index has been built yet
    pub fn handle_query(&self, query: &str) -> Result<Vec<SearchHit>> {
        let (Some(index), Some(corpus)) = (&self.index, &self.corpus) else {
            return Err(SearchError::NotTrained);
        };

        let hits = QueryEngine::new(index)
            .top_matches(query, self.config.search.max_results)
            .into_iter()
            .enumerate()
            .filter_map(|(position, scored)| {
                corpus.address(scored.index).map(|address| SearchHit {
                    rank: position + 1,
                    index: scored.index,
                    address: address.to_string(),
                    score: scored.score,
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!("Query {:?} matched {} documents", query, hits.len());
        Ok(hits)
    }

    /// Discards the stored corpus so the next [`SearchEngine::train`] crawls again
    ///
    /// The index already in memory keeps answering queries until then.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        self.index.is_some()
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    pub fn index(&self) -> Option<&TfIdfIndex> {
        self.index.as_ref()
    }

    /// Report of the crawl performed by the last `train`, if it crawled
    pub fn last_report(&self) -> Option<&CrawlReport> {
        self.last_report.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Statistics of the stored corpus, `None` when the store is empty
    pub fn stored_statistics(&self) -> Result<Option<CorpusStatistics>> {
        let Some(corpus) = self.store.load()? else {
            return Ok(None);
        };
        let snapshot = self.store.snapshot_info()?;
        Ok(Some(CorpusStatistics::from_corpus(&corpus, snapshot)))
    }
}
