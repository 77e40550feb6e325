use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docsweep::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the origin (scheme, host and port) of a URL
///
/// The origin identifies the scope of a robots.txt file. Returns None for
/// URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docsweep::url::origin_of;
///
/// let url = Url::parse("https://example.com:8443/docs/intro?x=1").unwrap();
/// assert_eq!(origin_of(&url).as_deref(), Some("https://example.com:8443"));
/// ```
pub fn origin_of(url: &Url) -> Option<String> {
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

/// Returns true if both URLs have the same host (ports are ignored)
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_domain(a), extract_domain(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
