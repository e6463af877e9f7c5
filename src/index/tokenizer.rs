//! Word tokenization shared by fitting and querying

use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"))
}

/// Splits text into tokens of two or more word characters
///
/// Single characters are never tokens. No case folding happens here; document
/// text is already lower-cased and queries are lower-cased by the caller.
///
/// # Examples
///
/// ```
/// use campus_search::index::tokenize;
///
/// let tokens: Vec<&str> = tokenize("a cat, the cat_s and 42").collect();
/// assert_eq!(tokens, vec!["cat", "the", "cat_s", "and", "42"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    token_pattern().find_iter(text).map(|m| m.as_str())
}
