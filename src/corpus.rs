//! Corpus data model
//!
//! A corpus is the ordered list of documents produced by a crawl. The order is
//! meaningful: a document's position is its column in the term-document matrix
//! and the number reported next to search results.

use std::fmt;

/// Position of a document within a [`Corpus`]
///
/// Indices are only meaningful for the corpus (and the index fitted on it)
/// they were taken from; a re-crawl can assign different positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentIndex(pub usize);

impl DocumentIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A crawled page: its address and its cleaned text
///
/// `text` may be empty when the page has no target content regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub address: String,
    pub text: String,
}

impl Document {
    pub fn new(address: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            text: text.into(),
        }
    }
}

/// Ordered, append-only collection of documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document and returns the index it was assigned
    pub fn push(&mut self, document: Document) -> DocumentIndex {
        self.documents.push(document);
        DocumentIndex(self.documents.len() - 1)
    }

    pub fn get(&self, index: DocumentIndex) -> Option<&Document> {
        self.documents.get(index.0)
    }

    /// Address of the document at `index`, if it exists
    pub fn address(&self, index: DocumentIndex) -> Option<&str> {
        self.get(index).map(|doc| doc.address.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterates over documents together with their indices
    pub fn iter(&self) -> impl Iterator<Item = (DocumentIndex, &Document)> {
        self.documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (DocumentIndex(i), doc))
    }

    /// Number of documents whose text is empty
    pub fn empty_documents(&self) -> usize {
        self.documents.iter().filter(|d| d.text.is_empty()).count()
    }
}

impl FromIterator<Document> for Corpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}
