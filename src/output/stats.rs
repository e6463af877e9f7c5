//! Crawl and corpus statistics
//!
//! This module provides the summary produced after a crawl and the corpus
//! statistics printed by `--stats`.

use crate::corpus::Corpus;
use crate::index::tokenize;
use crate::storage::SnapshotInfo;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

/// Summary of a single crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlReport {
    /// Addresses in the flattened traversal output
    pub addresses: usize,

    /// Pages fetched successfully across both passes
    pub pages_fetched: usize,

    /// Addresses whose fetch failed for good
    pub fetch_failures: usize,

    /// Documents added to the corpus
    pub documents: usize,

    /// Documents whose cleaned text is empty
    pub empty_documents: usize,

    /// Wall-clock time of the crawl
    pub elapsed: Duration,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} addresses, {} fetched, {} failed, {} documents ({} empty) in {:.1}s",
            self.addresses,
            self.pages_fetched,
            self.fetch_failures,
            self.documents,
            self.empty_documents,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Corpus statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStatistics {
    /// Total number of documents
    pub documents: usize,

    /// Documents with no text
    pub empty_documents: usize,

    /// Tokens across all documents
    pub total_tokens: usize,

    /// Distinct tokens across all documents
    pub vocabulary_size: usize,

    /// Snapshot metadata, when the corpus came from a store
    pub snapshot: Option<SnapshotInfo>,
}

impl CorpusStatistics {
    /// Computes statistics for a corpus
    pub fn from_corpus(corpus: &Corpus, snapshot: Option<SnapshotInfo>) -> Self {
        let mut total_tokens = 0;
        let mut vocabulary = HashSet::new();

        for document in corpus.documents() {
            for token in tokenize(&document.text) {
                total_tokens += 1;
                vocabulary.insert(token);
            }
        }

        Self {
            documents: corpus.len(),
            empty_documents: corpus.empty_documents(),
            total_tokens,
            vocabulary_size: vocabulary.len(),
            snapshot,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CorpusStatistics) {
    println!("=== Corpus Statistics ===\n");

    println!("Overview:");
    println!("  Documents: {}", stats.documents);
    println!("  Empty documents: {}", stats.empty_documents);
    println!("  Tokens: {}", stats.total_tokens);
    println!("  Vocabulary size: {}", stats.vocabulary_size);
    println!();

    match &stats.snapshot {
        Some(snapshot) => {
            println!("Snapshot:");
            println!("  Saved at: {}", snapshot.saved_at);
            println!("  Fingerprint: {}", snapshot.fingerprint);
        }
        None => println!("No stored snapshot"),
    }

    let coverage = if stats.documents > 0 {
        ((stats.documents - stats.empty_documents) as f64 / stats.documents as f64) * 100.0
    } else {
        0.0
    };
    println!();
    println!(
        "Text Coverage: {:.1}% ({} / {} documents have text)",
        coverage,
        stats.documents - stats.empty_documents,
        stats.documents
    );
}
