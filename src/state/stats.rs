use chrono::{DateTime, Utc};

/// Counters describing the crawl so far
///
/// Counters only grow; [`CrawlStats::reset`] is the only way back to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// Pages recorded (including pages whose extraction failed)
    pub pages_visited: u64,

    /// Fetches that returned a 2xx response
    pub successful_fetches: u64,

    /// Fetches that failed or were denied by robots.txt
    pub failed_fetches: u64,

    /// When the most recent crawl started
    pub started_at: Option<DateTime<Utc>>,

    /// When the most recent crawl returned
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    pub fn record_visit(&mut self) {
        self.pages_visited += 1;
    }

    pub fn record_success(&mut self) {
        self.successful_fetches += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed_fetches += 1;
    }

    /// Duration of the most recent crawl, once it has finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
