//! Crawl state owned by the engine
//!
//! This module defines the visited set, the page map and the crawl counters.
//! All of it lives for one engine instance and is cleared by
//! [`CrawlEngine::reset`](crate::crawler::CrawlEngine::reset).

mod page_map;
mod stats;
mod visited;

pub use page_map::PageMap;
pub use stats::CrawlStats;
pub use visited::VisitedSet;
