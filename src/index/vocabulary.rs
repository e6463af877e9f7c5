//! Term vocabulary

use crate::corpus::Corpus;
use crate::index::tokenizer::tokenize;
use std::collections::{BTreeSet, HashMap};

/// Maps each distinct corpus term to a row index
///
/// Terms are indexed in lexicographic order, so the same corpus always yields
/// the same vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds the vocabulary from every document in the corpus
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let distinct: BTreeSet<&str> = corpus
            .documents()
            .iter()
            .flat_map(|doc| tokenize(&doc.text))
            .collect();

        let terms: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let lookup = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self { terms, lookup }
    }

    /// Row index of a term, if it was seen during fitting
    pub fn get(&self, term: &str) -> Option<usize> {
        self.lookup.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
