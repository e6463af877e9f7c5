//! Page text extraction and cleaning
//!
//! Turns a fetched page into the text of a Document: target-region text is
//! extracted first, then run through the cleaning pipeline once.

mod clean;
mod content;

pub use clean::clean_text;
pub use content::PageExtractor;
