//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Admission checks (cancellation, page limit, URL validity, dedup)
//! - Politeness (rate limit, then robots.txt)
//! - Fetching and extracting each page
//! - Recording pages and expanding their links depth-first

use crate::config::{validate_crawl_config, CrawlConfig};
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::politeness::PolitenessGate;
use crate::crawler::scheduler::{order_links, Frontier, FrontierEntry};
use crate::extract::{extractor_for, ExtractOptions, Extractor, PageRecord};
use crate::state::{CrawlStats, PageMap, VisitedSet};
use crate::url::normalize_url;
use crate::{ConfigError, PageError};
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Called after every recorded page with (pages visited, max pages)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Cooperative cancellation flag shared with the engine
///
/// Clones share the same flag. The engine checks it before admitting each
/// URL and returns normally with whatever it has recorded so far.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// What a crawl hands back to its caller
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    /// Normalized URLs in visitation order
    pub visited: Vec<String>,

    /// One record per visited URL
    pub pages: PageMap,
}

/// The crawl engine
///
/// Owns every piece of mutable crawl state: the HTTP client, the robots
/// cache, the visited set, the page map and the counters. State accumulates
/// across calls to [`CrawlEngine::crawl`] until [`CrawlEngine::reset`].
pub struct CrawlEngine {
    fetcher: Fetcher,
    gate: PolitenessGate,
    custom_extractor: Option<Arc<dyn Extractor>>,
    frontier: Frontier,
    visited: VisitedSet,
    /// URLs already handed to the fetcher, including ones that failed
    attempted: HashSet<String>,
    pages: PageMap,
    stats: CrawlStats,
    cancel: CancelHandle,
}

impl CrawlEngine {
    /// Creates an engine with the default HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Ready to crawl
    /// * `Err(SweepError)` - The HTTP client could not be built
    pub fn new() -> crate::Result<Self> {
        Ok(Self::with_client(build_http_client()?))
    }

    /// Creates an engine that issues all requests through `client`
    pub fn with_client(client: Client) -> Self {
        Self {
            fetcher: Fetcher::new(client.clone()),
            gate: PolitenessGate::new(client),
            custom_extractor: None,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            attempted: HashSet::new(),
            pages: PageMap::new(),
            stats: CrawlStats::default(),
            cancel: CancelHandle::new(),
        }
    }

    /// Replaces the configured extractor with a custom one
    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.custom_extractor = Some(Arc::from(extractor));
        self
    }

    /// Runs a crawl from `config.seed`
    ///
    /// # Crawl Flow
    ///
    /// For every URL taken from the frontier:
    /// 1. Admission: stop if cancelled or the page limit is reached; skip
    ///    invalid, visited and already attempted URLs
    /// 2. Politeness: wait out the rate limit, then consult robots.txt
    /// 3. Fetch the page
    /// 4. Extract and record it, then report progress
    /// 5. Below the depth limit, push its links as the next frame
    ///
    /// Failures of a single URL are logged and counted, never returned.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutput)` - The crawl finished, hit a limit or was cancelled
    /// * `Err(SweepError)` - The configuration is invalid
    pub async fn crawl(
        &mut self,
        config: &CrawlConfig,
        progress: Option<ProgressCallback>,
    ) -> crate::Result<CrawlOutput> {
        validate_crawl_config(config)?;
        let seed =
            normalize_url(&config.seed).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        let extractor = match &self.custom_extractor {
            Some(custom) => Arc::clone(custom),
            None => Arc::from(extractor_for(config.extractor)),
        };
        let options = ExtractOptions::from(config);

        self.gate.configure(config);
        self.frontier.clear();
        self.frontier.seed(seed.as_str());
        self.stats.started_at = Some(Utc::now());
        self.stats.finished_at = None;

        tracing::info!(
            "Starting crawl of {} (max {} pages, depth {}, {} extractor)",
            seed,
            config.max_pages,
            config.max_depth,
            extractor.name()
        );

        while let Some(entry) = self.frontier.next() {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after {} pages", self.visited.len());
                break;
            }

            if self.visited.len() >= config.max_pages {
                tracing::debug!("Page limit of {} reached", config.max_pages);
                break;
            }

            let Some(url) = self.admit(&entry) else {
                continue;
            };

            let record = match self.visit(&url, extractor.as_ref(), &options).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("{}", e);
                    continue;
                }
            };

            self.record(record, &url, entry.depth, config, progress.as_ref());
        }

        self.stats.finished_at = Some(Utc::now());
        tracing::info!(
            "Crawl completed: {} pages visited, {} successful fetches, {} failed",
            self.visited.len(),
            self.stats.successful_fetches,
            self.stats.failed_fetches
        );

        Ok(CrawlOutput {
            visited: self.visited.urls().to_vec(),
            pages: self.pages.clone(),
        })
    }

    /// Resolves a frontier entry into a URL that may be fetched
    ///
    /// Marks the URL as attempted so it is never fetched twice.
    fn admit(&mut self, entry: &FrontierEntry) -> Option<Url> {
        let url = match normalize_url(&entry.url) {
            Ok(url) => url,
            Err(source) => {
                let error = PageError::InvalidUrl {
                    url: entry.url.clone(),
                    source,
                };
                tracing::debug!("Skipping: {}", error);
                return None;
            }
        };

        if self.visited.contains(url.as_str()) {
            tracing::debug!("Skipping already visited URL: {}", url);
            return None;
        }

        if !self.attempted.insert(url.to_string()) {
            tracing::debug!("Skipping already attempted URL: {}", url);
            return None;
        }

        Some(url)
    }

    /// Runs politeness, fetch and extraction for one URL
    async fn visit(
        &mut self,
        url: &Url,
        extractor: &dyn Extractor,
        options: &ExtractOptions,
    ) -> Result<PageRecord, PageError> {
        self.gate.throttle().await;

        if !self.gate.allowed(url).await {
            self.stats.record_failure();
            return Err(PageError::RobotsDenied {
                url: url.to_string(),
            });
        }
        self.gate.record_fetch();

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => {
                self.stats.record_success();
                html
            }
            Err(source) => {
                self.stats.record_failure();
                return Err(PageError::Fetch {
                    url: url.to_string(),
                    source,
                });
            }
        };

        match extractor.extract(url, &html, options) {
            Ok(record) => Ok(record),
            Err(source) => {
                let error = PageError::Parse {
                    url: url.to_string(),
                    source,
                };
                tracing::warn!("{}; storing an empty record", error);
                Ok(PageRecord::empty(url.as_str()))
            }
        }
    }

    /// Stores a page, reports progress and schedules its children
    fn record(
        &mut self,
        record: PageRecord,
        url: &Url,
        depth: u32,
        config: &CrawlConfig,
        progress: Option<&ProgressCallback>,
    ) {
        let key = url.to_string();
        let record = PageRecord {
            url: key.clone(),
            ..record
        };

        self.visited.insert(&key);
        self.stats.record_visit();
        tracing::info!(
            "Visited [{}/{}] {} (depth {})",
            self.visited.len(),
            config.max_pages,
            key,
            depth
        );

        let children = if depth < config.max_depth {
            order_links(&record.links, config.link_order, &self.visited)
        } else {
            Vec::new()
        };
        self.pages.insert(record);

        if let Some(callback) = progress {
            callback(self.visited.len(), config.max_pages);
        }

        if !children.is_empty() {
            tracing::debug!("Queued {} links from {}", children.len(), key);
            self.frontier.push_children(children, depth + 1);
        }
    }

    /// Clears all crawl state so the engine can start over
    ///
    /// Drops visited URLs, pages, cached robots policies, counters and the
    /// cancellation flag. The HTTP client and any custom extractor are kept.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.attempted.clear();
        self.pages.clear();
        self.gate.reset();
        self.stats.reset();
        self.cancel.clear();
        tracing::debug!("Crawl state reset");
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn pages(&self) -> &PageMap {
        &self.pages
    }

    /// A handle that stops this engine's crawls
    ///
    /// Once cancelled, the current crawl returns after the page in flight and
    /// every later crawl returns immediately, until [`CrawlEngine::reset`].
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SweepError;

    #[test]
    fn test_cancel_handle_is_shared() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_cancelled());

        clone.cancel();
        assert!(handle.is_cancelled());

        handle.clear();
        assert!(!clone.is_cancelled());
    }

    #[test]
    fn test_engine_creation() {
        let engine = CrawlEngine::new().unwrap();
        assert!(engine.visited().is_empty());
        assert!(engine.pages().is_empty());
        assert_eq!(engine.stats(), &CrawlStats::default());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut engine = CrawlEngine::new().unwrap();

        let zero_pages = CrawlConfig::new("https://example.com").with_max_pages(0);
        assert!(matches!(
            engine.crawl(&zero_pages, None).await,
            Err(SweepError::Config(_))
        ));

        let bad_seed = CrawlConfig::new("ftp://example.com");
        assert!(matches!(
            engine.crawl(&bad_seed, None).await,
            Err(SweepError::Config(_))
        ));
        assert_eq!(engine.stats().pages_visited, 0);
    }

    #[tokio::test]
    async fn test_reset_clears_cancellation() {
        let mut engine = CrawlEngine::new().unwrap();
        engine.cancel_handle().cancel();
        engine.reset();
        assert!(!engine.cancel_handle().is_cancelled());
    }
}
