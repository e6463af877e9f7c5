//! Output module for presenting search results and statistics
//!
//! This module handles:
//! - Formatting ranked search hits for the terminal
//! - Crawl reports and corpus statistics

pub mod stats;

pub use stats::{print_statistics, CorpusStatistics, CrawlReport};

use crate::engine::SearchHit;
use std::io::{self, Write};

/// Formats one hit as `[index] address (score)`
///
/// # Examples
///
/// ```
/// use campus_search::output::format_hit;
/// use campus_search::{DocumentIndex, SearchHit};
///
/// let hit = SearchHit {
///     rank: 1,
///     index: DocumentIndex(4),
///     address: "https://www.eecs.utk.edu/people".to_string(),
///     score: 0.5271,
/// };
/// assert_eq!(format_hit(&hit), "[4] https://www.eecs.utk.edu/people (0.53)");
/// ```
pub fn format_hit(hit: &SearchHit) -> String {
    format!("[{}] {} ({:.2})", hit.index, hit.address, hit.score)
}

/// Writes hits one per line, or a notice when there are none
pub fn write_hits<W: Write>(out: &mut W, hits: &[SearchHit]) -> io::Result<()> {
    if hits.is_empty() {
        writeln!(out, "No matching documents")?;
        return Ok(());
    }

    for hit in hits {
        writeln!(out, "{}", format_hit(hit))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DocumentIndex;

    fn hit(rank: usize, index: usize, score: f64) -> SearchHit {
        SearchHit {
            rank,
            index: DocumentIndex(index),
            address: format!("https://www.utk.edu/{}", index),
            score,
        }
    }

    #[test]
    fn test_write_hits() {
        let mut out = Vec::new();
        write_hits(&mut out, &[hit(1, 2, 0.8), hit(2, 0, 0.1234)]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[2] https://www.utk.edu/2 (0.80)\n[0] https://www.utk.edu/0 (0.12)\n"
        );
    }

    #[test]
    fn test_write_no_hits() {
        let mut out = Vec::new();
        write_hits(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matching documents\n");
    }
}
