//! URL handling module for Campus-Search
//!
//! This module provides URL normalization, domain extraction and the host
//! suffix filter that keeps a crawl inside one organisation's domain.

mod domain;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::host_has_suffix;
pub use normalize::{normalize, normalize_url};

/// Restricts a crawl to hosts ending in a fixed set of labels
///
/// The filter compares whole dot-separated labels, so a suffix of `utk.edu`
/// accepts `utk.edu` and `www.eecs.utk.edu` but not `notutk.edu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFilter {
    labels: Vec<String>,
}

impl DomainFilter {
    /// Creates a filter from a suffix such as `"utk.edu"`
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_search::url::DomainFilter;
    /// use url::Url;
    ///
    /// let filter = DomainFilter::new("utk.edu");
    /// assert!(filter.accepts(&Url::parse("https://www.eecs.utk.edu/").unwrap()));
    /// assert!(!filter.accepts(&Url::parse("https://www.vols.com/").unwrap()));
    /// ```
    pub fn new(suffix: &str) -> Self {
        let labels = suffix
            .trim_matches('.')
            .split('.')
            .filter(|label| !label.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        Self { labels }
    }

    /// Returns true if the URL's host ends with the configured labels
    pub fn accepts(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| host_has_suffix(host, &self.labels))
    }

    /// The suffix this filter matches, joined back with dots
    pub fn suffix(&self) -> String {
        self.labels.join(".")
    }
}
