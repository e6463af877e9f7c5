//! Storage module for persisting the crawled corpus
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Saving and restoring the ordered document list
//! - Snapshot metadata (save time and corpus fingerprint)

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteCorpusStore;
pub use traits::{CorpusStore, StorageError, StorageResult};

/// Metadata recorded alongside a stored corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// RFC 3339 timestamp of the save
    pub saved_at: String,
    pub document_count: usize,
    /// Fingerprint of the settings the corpus was crawled with
    pub fingerprint: String,
}
