//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the CorpusStore trait.

use crate::corpus::{Corpus, Document};
use crate::storage::schema::{get_schema_version, initialize_schema};
use crate::storage::traits::{CorpusStore, StorageError, StorageResult};
use crate::storage::SnapshotInfo;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite corpus store
pub struct SqliteCorpusStore {
    conn: Connection,
    fingerprint: String,
}

impl SqliteCorpusStore {
    /// Opens or creates a corpus database
    ///
    /// Missing parent directories are created.
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteCorpusStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;
        tracing::debug!("Opened corpus store at {}", path.display());

        Ok(Self {
            conn,
            fingerprint: String::new(),
        })
    }

    /// Creates an in-memory database
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            fingerprint: String::new(),
        })
    }

    /// Sets the fingerprint recorded with saves and checked on loads
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = fingerprint.into();
        self
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl CorpusStore for SqliteCorpusStore {
    fn load(&self) -> StorageResult<Option<Corpus>> {
        let Some(info) = self.snapshot_info()? else {
            return Ok(None);
        };

        if info.document_count == 0 {
            return Ok(None);
        }

        if !self.fingerprint.is_empty() && info.fingerprint != self.fingerprint {
            tracing::warn!(
                "Stored corpus was built with different crawl settings ({} != {}); \
                 delete it to re-crawl",
                info.fingerprint,
                self.fingerprint
            );
        }

        let mut stmt = self
            .conn
            .prepare("SELECT position, address, text FROM documents ORDER BY position")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                Document {
                    address: row.get(1)?,
                    text: row.get(2)?,
                },
            ))
        })?;

        let mut corpus = Corpus::new();
        for row in rows {
            let (position, document) = row?;
            let expected = corpus.len() as i64;
            if position != expected {
                return Err(StorageError::Corrupt(format!(
                    "expected document at position {}, found {}",
                    expected, position
                )));
            }
            corpus.push(document);
        }

        if corpus.len() != info.document_count {
            return Err(StorageError::Corrupt(format!(
                "snapshot lists {} documents but {} are stored",
                info.document_count,
                corpus.len()
            )));
        }

        tracing::info!(
            "Loaded {} documents saved at {}",
            corpus.len(),
            info.saved_at
        );
        Ok(Some(corpus))
    }

    fn save(&mut self, corpus: &Corpus) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM documents", [])?;
        tx.execute("DELETE FROM snapshot", [])?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO documents (position, address, text) VALUES (?1, ?2, ?3)",
            )?;
            for (index, document) in corpus.iter() {
                insert.execute(params![
                    index.get() as i64,
                    document.address,
                    document.text
                ])?;
            }
        }

        tx.execute(
            "INSERT INTO snapshot (id, saved_at, document_count, fingerprint, schema_version)
             VALUES (1, ?1, ?2, ?3, ?4)",
            params![
                Utc::now().to_rfc3339(),
                corpus.len() as i64,
                self.fingerprint,
                get_schema_version()
            ],
        )?;

        tx.commit()?;
        tracing::info!("Saved {} documents", corpus.len());
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM documents", [])?;
        tx.execute("DELETE FROM snapshot", [])?;
        tx.commit()?;
        tracing::info!("Cleared stored corpus");
        Ok(())
    }

    fn snapshot_info(&self) -> StorageResult<Option<SnapshotInfo>> {
        let info = self
            .conn
            .query_row(
                "SELECT saved_at, document_count, fingerprint FROM snapshot WHERE id = 1",
                [],
                |row| {
                    Ok(SnapshotInfo {
                        saved_at: row.get(0)?,
                        document_count: row.get::<_, i64>(1)? as usize,
                        fingerprint: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(info)
    }
}
