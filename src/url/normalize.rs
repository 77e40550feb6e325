use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a URL into the form used as a visited-set key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Only `http` and `https` schemes are accepted
/// 3. A host is required
/// 4. Remove the query string
/// 5. Remove the fragment (everything after #)
///
/// Scheme and host are lowercased by the parser; the path is kept as written.
///
/// # Examples
///
/// ```
/// use docsweep::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.com/guide?page=2#install").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/guide");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
