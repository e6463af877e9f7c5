//! Storage traits and error types
//!
//! This module defines the trait interface for corpus stores and the
//! associated error types.

use crate::corpus::Corpus;
use crate::storage::SnapshotInfo;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored corpus is corrupt: {0}")]
    Corrupt(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence for a crawled corpus
///
/// A store holds at most one corpus. Saving replaces whatever was stored and
/// loading restores the same ordered address/text pairs.
pub trait CorpusStore {
    /// Loads the stored corpus, or `None` when nothing usable is stored
    fn load(&self) -> StorageResult<Option<Corpus>>;

    /// Replaces the stored corpus
    fn save(&mut self, corpus: &Corpus) -> StorageResult<()>;

    /// Discards the stored corpus so the next load returns `None`
    fn clear(&mut self) -> StorageResult<()>;

    /// Metadata of the stored corpus, if any
    fn snapshot_info(&self) -> StorageResult<Option<SnapshotInfo>>;
}
