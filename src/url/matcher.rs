/// Checks if a host matches a documentation domain pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact: "docs.python.org" matches only "docs.python.org"
/// 2. Wildcard: "*.readthedocs.io" matches "readthedocs.io" and any
///    subdomain of it, e.g. "requests.readthedocs.io"
///
/// Hosts are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use docsweep::url::matches_wildcard;
///
/// assert!(matches_wildcard("docs.python.org", "docs.python.org"));
/// assert!(matches_wildcard("*.readthedocs.io", "requests.readthedocs.io"));
/// assert!(!matches_wildcard("*.readthedocs.io", "readthedocs.io.evil.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}
