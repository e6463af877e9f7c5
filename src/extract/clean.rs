//! Text cleaning applied to every extracted document
//!
//! The steps run in a fixed order:
//!
//! 1. drop non-ASCII characters
//! 2. strip social handles (`@` followed by word characters)
//! 3. strip ASCII punctuation
//! 4. collapse whitespace runs into single spaces and trim the ends
//! 5. lower-case
//!
//! Each step is idempotent and no step can re-create input for an earlier
//! one, so cleaning an already clean string returns it unchanged.

use regex::Regex;
use std::sync::OnceLock;

fn handle_pattern() -> &'static Regex {
    static HANDLE: OnceLock<Regex> = OnceLock::new();
    HANDLE.get_or_init(|| Regex::new(r"@\w+").expect("handle pattern is a valid regex"))
}

/// Runs the full cleaning pipeline over extracted page text
///
/// # Examples
///
/// ```
/// use campus_search::extract::clean_text;
///
/// let cleaned = clean_text("Follow @UTKnoxville!  Go   Vols — café");
/// assert_eq!(cleaned, "follow go vols caf");
/// ```
pub fn clean_text(raw: &str) -> String {
    let ascii_only = strip_non_ascii(raw);
    let no_handles = strip_handles(&ascii_only);
    let no_punctuation = strip_punctuation(&no_handles);
    let collapsed = collapse_whitespace(&no_punctuation);
    collapsed.to_ascii_lowercase()
}

fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn strip_handles(text: &str) -> String {
    handle_pattern().replace_all(text, "").into_owned()
}

fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
