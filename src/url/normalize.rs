use crate::UrlError;
use url::Url;

/// List of tracking query parameters to remove during normalization
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
];

/// Normalizes a URL string into a traversal address
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed (parsing also lowercases the host,
///    drops default ports and removes `.`/`..` path segments)
/// 2. Reject anything that is not http or https
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove tracking query parameters, keeping the rest in their original order
/// 6. Remove an empty query string (trailing ?)
///
/// Paths are left untouched otherwise: a trailing slash is significant to the
/// server and is preserved.
///
/// # Examples
///
/// ```
/// use campus_search::url::normalize_url;
///
/// let url = normalize_url("https://WWW.UTK.EDU/about/?utm_source=x#team").unwrap();
/// assert_eq!(url.as_str(), "https://www.utk.edu/about/");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize(url)
}

/// Normalizes an already parsed URL; see [`normalize_url`] for the rules
pub fn normalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    if let Some(query) = url.query() {
        if query.is_empty() {
            url.set_query(None);
        } else if url.query_pairs().any(|(key, _)| is_tracking_param(&key)) {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !is_tracking_param(key))
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();

            if kept.is_empty() {
                url.set_query(None);
            } else {
                url.query_pairs_mut().clear().extend_pairs(kept);
            }
        }
    }

    Ok(url)
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
