//! Query ranking by cosine similarity

use crate::corpus::DocumentIndex;
use crate::index::tfidf::{SparseVector, TfIdfIndex};

/// A document and its similarity to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument {
    pub index: DocumentIndex,
    pub score: f64,
}

/// Cosine similarity of two vectors
///
/// Defined as 0 when either vector has zero norm. The result is clamped to
/// `[-1, 1]` to absorb rounding error.
///
/// # Examples
///
/// ```
/// use campus_search::index::{cosine_similarity, SparseVector};
///
/// let a = SparseVector::from_entries(vec![(0, 1.0), (1, 1.0)]);
/// let zero = SparseVector::default();
/// assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&a, &zero), 0.0);
/// ```
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norms = a.norm() * b.norm();
    if norms == 0.0 || !norms.is_finite() {
        return 0.0;
    }

    (a.dot(b) / norms).clamp(-1.0, 1.0)
}

/// Ranks the documents of a fitted index against free-text queries
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a TfIdfIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a TfIdfIndex) -> Self {
        Self { index }
    }

    /// Scores every document, best first
    ///
    /// Equal scores keep document order, so the smaller index ranks first.
    /// A query with no known terms scores every document 0.
    pub fn rank(&self, query: &str) -> Vec<ScoredDocument> {
        let query_vector = self.index.vectorize(query);

        let mut scored: Vec<ScoredDocument> = self
            .index
            .matrix()
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| ScoredDocument {
                index: DocumentIndex(i),
                score: cosine_similarity(column, &query_vector),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// The best `limit` documents with a strictly positive score
    pub fn top_matches(&self, query: &str, limit: usize) -> Vec<ScoredDocument> {
        self.rank(query)
            .into_iter()
            .filter(|scored| scored.score > 0.0)
            .take(limit)
            .collect()
    }
}
