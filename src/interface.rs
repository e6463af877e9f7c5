//! Terminal front-end
//!
//! Two ways of talking to a [`SearchEngine`]: a one-shot query, and an
//! interactive session reading commands line by line. Both are generic over
//! their input and output so sessions can be scripted.

use crate::engine::SearchEngine;
use crate::output::write_hits;
use crate::storage::CorpusStore;
use crate::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:exit` ends the session
    Exit,
    /// `:train` rebuilds the index, crawling if nothing is stored
    Train,
    /// `:delete` discards the stored corpus
    Delete,
    /// Anything else is a query
    Query(String),
    /// Blank line
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Empty,
            ":exit" => Self::Exit,
            ":train" => Self::Train,
            ":delete" => Self::Delete,
            query => Self::Query(query.to_string()),
        }
    }
}

const BANNER: &str = "\
Campus Search
  :train   rebuild the index (crawls when no corpus is stored)
  :delete  discard the stored corpus
  :exit    quit
Anything else is a search query.";

/// Trains the engine, runs a single query and writes the hits
pub async fn run_query<S, W>(engine: &mut SearchEngine<S>, query: &str, out: &mut W) -> Result<()>
where
    S: CorpusStore,
    W: Write,
{
    engine.train().await?;
    let hits = engine.handle_query(query)?;
    write_hits(out, &hits)?;
    Ok(())
}

/// Runs an interactive session until `:exit` or end of input
///
/// The index is trained before the first prompt. Failures of individual
/// commands are reported on `out` and the session continues; only I/O errors
/// on the session streams end it early.
pub async fn run_interactive<S, R, W>(
    engine: &mut SearchEngine<S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: CorpusStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", BANNER)?;

    if let Err(e) = engine.train().await {
        tracing::error!("Initial training failed: {}", e);
        writeln!(out, "Error: {}", e)?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Exit => break,
            Command::Train => match engine.train().await {
                Ok(()) => writeln!(out, "Index rebuilt")?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::Delete => match engine.reset() {
                Ok(()) => writeln!(out, "Stored corpus deleted")?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::Query(query) => match engine.handle_query(&query) {
                Ok(hits) => write_hits(out, &hits)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::corpus::{Corpus, Document};
    use crate::storage::SqliteCorpusStore;

    fn engine() -> SearchEngine<SqliteCorpusStore> {
        let corpus: Corpus = vec![
            Document::new("https://www.utk.edu/cat", "the cat sat"),
            Document::new("https://www.utk.edu/dog", "the dog sat"),
            Document::new("https://www.utk.edu/birds", "birds fly"),
        ]
        .into_iter()
        .collect();

        let mut store = SqliteCorpusStore::in_memory().unwrap();
        store.save(&corpus).unwrap();
        SearchEngine::new(Config::default(), store)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(":exit"), Command::Exit);
        assert_eq!(Command::parse("  :train "), Command::Train);
        assert_eq!(Command::parse(":delete"), Command::Delete);
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(
            Command::parse(" machine learning "),
            Command::Query("machine learning".to_string())
        );
    }

    #[tokio::test]
    async fn test_run_query_writes_hits() {
        let mut engine = engine();
        let mut out = Vec::new();
        run_query(&mut engine, "cat", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[0] https://www.utk.edu/cat (0.68)\n"
        );
    }

    #[tokio::test]
    async fn test_interactive_session() {
        let mut engine = engine();
        let input: &[u8] = b"cat\n\nzebra\n:delete\n:exit\nbirds\n";
        let mut out = Vec::new();

        run_interactive(&mut engine, input, &mut out).await.unwrap();
        let transcript = String::from_utf8(out).unwrap();

        assert!(transcript.starts_with("Campus Search"));
        assert!(transcript.contains("> [0] https://www.utk.edu/cat (0.68)\n"));
        assert!(transcript.contains("> No matching documents\n"));
        assert!(transcript.contains("> Stored corpus deleted\n"));
        // Nothing after :exit is read
        assert!(!transcript.contains("https://www.utk.edu/birds"));
        assert!(engine.store().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_interactive_session_ends_at_eof() {
        let mut engine = engine();
        let input: &[u8] = b"dog";
        let mut out = Vec::new();

        run_interactive(&mut engine, input, &mut out).await.unwrap();
        let transcript = String::from_utf8(out).unwrap();
        assert!(transcript.contains("[1] https://www.utk.edu/dog"));
        assert!(transcript.ends_with("> \n"));
    }
}
