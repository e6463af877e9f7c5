//! TF-IDF weighting
//!
//! Weights follow the smoothed scheme:
//!
//! ```text
//! idf(t)    = ln((1 + N) / (1 + df(t))) + 1
//! w(t, d)   = count(t, d) * idf(t)
//! ```
//!
//! where `N` counts every document, empty ones included. Each document vector
//! is then scaled to unit L2 norm; a document without terms keeps a zero
//! vector.

use crate::corpus::{Corpus, DocumentIndex};
use crate::index::tokenizer::tokenize;
use crate::index::vocabulary::Vocabulary;
use crate::index::IndexError;
use std::collections::BTreeMap;

/// A vector stored as `(term index, weight)` pairs sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from entries; they are sorted by term index
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Weight of a term, zero when absent
    pub fn get(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map_or(0.0, |i| self.entries[i].1)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Scales to unit L2 norm; a zero vector is left as is
    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
        self
    }
}

/// Term-document matrix stored column by column
///
/// Column `d` is the weight vector of the document at [`DocumentIndex`] `d`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermDocumentMatrix {
    terms: usize,
    columns: Vec<SparseVector>,
}

impl TermDocumentMatrix {
    pub fn column(&self, document: DocumentIndex) -> Option<&SparseVector> {
        self.columns.get(document.get())
    }

    pub fn columns(&self) -> &[SparseVector] {
        &self.columns
    }

    /// Cell `(term, document)`, zero when either is out of range
    pub fn weight(&self, term: usize, document: DocumentIndex) -> f64 {
        self.column(document).map_or(0.0, |column| column.get(term))
    }

    pub fn term_count(&self) -> usize {
        self.terms
    }

    pub fn document_count(&self) -> usize {
        self.columns.len()
    }
}

/// A fitted TF-IDF model: vocabulary, IDF weights and the document matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfIndex {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    matrix: TermDocumentMatrix,
}

impl TfIdfIndex {
    /// Fits the model on a corpus
    ///
    /// # Errors
    ///
    /// * [`IndexError::EmptyCorpus`] - the corpus has no documents
    /// * [`IndexError::EmptyVocabulary`] - no document contains a single token
    pub fn fit(corpus: &Corpus) -> Result<Self, IndexError> {
        if corpus.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        let vocabulary = Vocabulary::from_corpus(corpus);
        if vocabulary.is_empty() {
            return Err(IndexError::EmptyVocabulary {
                documents: corpus.len(),
            });
        }

        let counts: Vec<BTreeMap<usize, usize>> = corpus
            .documents()
            .iter()
            .map(|doc| term_counts(&vocabulary, &doc.text))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc_counts in &counts {
            for term in doc_counts.keys() {
                document_frequency[*term] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let columns = counts
            .iter()
            .map(|doc_counts| weigh(doc_counts, &idf))
            .collect();

        tracing::debug!(
            "Fitted TF-IDF over {} documents and {} terms",
            corpus.len(),
            vocabulary.len()
        );

        Ok(Self {
            matrix: TermDocumentMatrix {
                terms: vocabulary.len(),
                columns,
            },
            vocabulary,
            idf,
        })
    }

    /// Vectorizes arbitrary text with the fitted vocabulary and IDF weights
    ///
    /// The text is lower-cased first. Terms outside the vocabulary are dropped,
    /// so a query made only of unknown terms yields a zero vector.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();
        weigh(&term_counts(&self.vocabulary, &lowered), &self.idf)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &TermDocumentMatrix {
        &self.matrix
    }

    /// Fitted IDF weight of a term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|i| self.idf[i])
    }

    pub fn document_count(&self) -> usize {
        self.matrix.document_count()
    }
}

fn term_counts(vocabulary: &Vocabulary, text: &str) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        if let Some(term) = vocabulary.get(token) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    counts
}

fn weigh(counts: &BTreeMap<usize, usize>, idf: &[f64]) -> SparseVector {
    let entries = counts
        .iter()
        .map(|(&term, &count)| (term, count as f64 * idf[term]))
        .collect();
    SparseVector { entries }.normalized()
}
