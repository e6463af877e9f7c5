//! TF-IDF indexing and similarity ranking
//!
//! This module handles:
//! - Tokenizing document and query text
//! - Building the vocabulary and the term-document matrix
//! - Ranking documents against a query by cosine similarity

mod query;
mod tfidf;
mod tokenizer;
mod vocabulary;

pub use query::{cosine_similarity, QueryEngine, ScoredDocument};
pub use tfidf::{SparseVector, TermDocumentMatrix, TfIdfIndex};
pub use tokenizer::tokenize;
pub use vocabulary::Vocabulary;

use thiserror::Error;

/// Errors that can occur while fitting an index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Cannot build an index from an empty corpus")]
    EmptyCorpus,

    #[error("None of the {documents} documents contain any indexable terms")]
    EmptyVocabulary { documents: usize },
}
