/// Checks whether the trailing dot-separated labels of `host` equal `suffix_labels`
///
/// A host with fewer labels than the suffix never matches.
pub fn host_has_suffix(host: &str, suffix_labels: &[String]) -> bool {
    let host = host.trim_end_matches('.');
    let labels: Vec<&str> = host.split('.').collect();

    if labels.len() < suffix_labels.len() || suffix_labels.is_empty() {
        return false;
    }

    labels[labels.len() - suffix_labels.len()..]
        .iter()
        .zip(suffix_labels)
        .all(|(label, expected)| label.eq_ignore_ascii_case(expected))
}
