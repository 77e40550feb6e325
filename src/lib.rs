//! Docsweep: a polite documentation crawler
//!
//! This crate crawls the web from a seed URL, following links up to a bounded
//! depth and page count while respecting robots.txt and a rate limit. Every
//! visited page is turned into a structured [`PageRecord`](extract::PageRecord)
//! and the accumulated records can be rendered as a text report or a JSON
//! document.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Crawl-level error type
///
/// Only conditions that make a whole crawl impossible end up here. Problems
/// with a single page are recovered inside the engine (see [`PageError`]).
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Reasons a single URL produced no page record
///
/// None of these abort a crawl; the engine logs them and moves on.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl { url: String, source: UrlError },

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        source: crawler::FetchError,
    },

    #[error("Extraction failed for {url}: {source}")]
    Parse {
        url: String,
        source: extract::ExtractError,
    },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, ExtractorKind, LinkOrder};
pub use crawler::{CancelHandle, CrawlEngine, CrawlOutput, ProgressCallback};
pub use extract::{Extractor, PageRecord};
pub use state::{CrawlStats, PageMap, VisitedSet};
pub use url::{is_documentation_url, normalize_url};
