//! Database schema definitions
//!
//! This module contains the SQL schema of the corpus database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per document, in corpus order
CREATE TABLE IF NOT EXISTS documents (
    position INTEGER PRIMARY KEY,
    address TEXT NOT NULL,
    text TEXT NOT NULL
);

-- Metadata of the stored corpus; at most one row
CREATE TABLE IF NOT EXISTS snapshot (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    saved_at TEXT NOT NULL,
    document_count INTEGER NOT NULL,
    fingerprint TEXT NOT NULL,
    schema_version INTEGER NOT NULL
);
"#;

/// Initializes the database schema
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Gets the current schema version
///
/// Stored with every snapshot so a future layout change can be detected.
pub fn get_schema_version() -> u32 {
    1
}
