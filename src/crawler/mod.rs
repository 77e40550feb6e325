//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a fixed client identity
//! - Politeness: robots.txt and the inter-request rate limit
//! - The depth-first frontier and link ordering
//! - Overall crawl coordination in [`CrawlEngine`]

mod coordinator;
mod fetcher;
mod politeness;
mod scheduler;

pub use coordinator::{CancelHandle, CrawlEngine, CrawlOutput, ProgressCallback};
pub use fetcher::{build_http_client, FetchError, Fetcher, FETCH_TIMEOUT, ROBOTS_AGENT, USER_AGENT};
pub use politeness::{PolitenessGate, RateLimiter};
pub use scheduler::{order_links, Frontier, FrontierEntry};
