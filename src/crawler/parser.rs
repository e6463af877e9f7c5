//! HTML link extraction
//!
//! Collects the targets of every `<a href>` on a page, resolved against the
//! page's final URL and normalized into traversal addresses.

use crate::url::normalize;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, relative or absolute
///
/// **Exclude (silently dropped):**
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets
/// - Fragment-only links (same page anchors)
/// - Hrefs that fail to resolve or normalize
/// - Non-HTTP(S) URLs after resolution
///
/// Links are returned in document order and may contain duplicates; the
/// traversal deduplicates them.
///
/// # Example
///
/// ```
/// use campus_search::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/people#faculty">People</a></body></html>"#;
/// let base_url = Url::parse("https://www.eecs.utk.edu/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://www.eecs.utk.edu/people");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    normalize(absolute_url).ok()
}
