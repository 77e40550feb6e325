//! URL handling module for Docsweep
//!
//! This module provides URL normalization and validation, domain and origin
//! extraction, and the heuristic that recognises documentation pages.

mod domain;
mod matcher;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{extract_domain, origin_of, same_host};
pub use matcher::matches_wildcard;
pub use normalize::normalize_url;

/// Hosts known to serve programming documentation
const DOC_DOMAINS: &[&str] = &[
    "docs.python.org",
    "*.readthedocs.io",
    "docs.djangoproject.com",
    "flask.palletsprojects.com",
    "nodejs.org",
    "developer.mozilla.org",
    "docs.oracle.com",
    "docs.microsoft.com",
    "learn.microsoft.com",
    "docs.aws.amazon.com",
    "docs.rs",
    "doc.rust-lang.org",
];

/// Path segments that usually mark documentation sections
const DOC_PATH_PATTERNS: &[&str] = &[
    "/docs/",
    "/doc/",
    "/documentation/",
    "/api/",
    "/reference/",
    "/manual/",
    "/guide/",
    "/tutorial/",
];

/// Classifies a URL as documentation-like
///
/// A URL is documentation-like when its host matches one of the known
/// documentation domains, or when its path contains a typical documentation
/// segment such as `/docs/` or `/reference/`. The engine uses this to expand
/// documentation links before the others.
///
/// # Examples
///
/// ```
/// use docsweep::url::is_documentation_url;
///
/// assert!(is_documentation_url("https://docs.python.org/3/tutorial/index.html"));
/// assert!(is_documentation_url("https://example.com/docs/api/"));
/// assert!(!is_documentation_url("https://news.ycombinator.com"));
/// ```
pub fn is_documentation_url(url_str: &str) -> bool {
    let Ok(url) = Url::parse(url_str) else {
        return false;
    };

    if let Some(host) = extract_domain(&url) {
        if DOC_DOMAINS
            .iter()
            .any(|pattern| matches_wildcard(pattern, &host))
        {
            return true;
        }
    }

    let path = url.path();
    DOC_PATH_PATTERNS.iter().any(|pattern| path.contains(pattern))
}
