//! Politeness: robots.txt decisions and the inter-request rate limit
//!
//! Robots files are fetched lazily, once per origin, and cached for the life
//! of the engine. Every failure on the robots path fails open.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::ROBOTS_AGENT;
use crate::robots::{fetch_robots, ParsedRobots, RobotsCache};
use crate::url::origin_of;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Enforces a minimum interval between consecutive fetches
///
/// One clock for the whole crawl, not one per domain. The clock only moves
/// when a fetch is recorded with [`RateLimiter::mark`], so waiting for a URL
/// that is then refused does not delay the next one. Until the first mark,
/// [`RateLimiter::wait`] never sleeps.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter allowing one fetch every `seconds` seconds
    ///
    /// Zero, negative and non-finite values disable the limit.
    pub fn new(seconds: f64) -> Self {
        Self {
            interval: interval_from_secs(seconds),
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, seconds: f64) {
        self.interval = interval_from_secs(seconds);
    }

    /// Sleeps until the interval since the last recorded fetch has elapsed
    pub async fn wait(&self) {
        if let Some(last) = self.last {
            let ready_at = last + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
    }

    /// Records that a fetch is starting now
    pub fn mark(&mut self) {
        self.last = Some(Instant::now());
    }

    /// Forgets the previous fetch, so the next wait returns immediately
    pub fn reset(&mut self) {
        self.last = None;
    }
}

fn interval_from_secs(seconds: f64) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    }
}

/// Decides whether a URL may be fetched and when
pub struct PolitenessGate {
    client: Client,
    robots: RobotsCache,
    limiter: RateLimiter,
    respect_robots: bool,
}

impl PolitenessGate {
    /// Creates a gate that respects robots.txt and applies no rate limit
    /// until [`PolitenessGate::configure`] is called
    pub fn new(client: Client) -> Self {
        Self {
            client,
            robots: RobotsCache::new(),
            limiter: RateLimiter::new(0.0),
            respect_robots: true,
        }
    }

    /// Applies the politeness settings of a crawl
    pub fn configure(&mut self, config: &CrawlConfig) {
        self.respect_robots = config.respect_robots;
        self.limiter.set_interval(config.rate_limit);
    }

    /// Returns true if robots.txt permits fetching `url`
    ///
    /// Always true when robots compliance is off. A robots file that cannot
    /// be retrieved is treated as allowing everything, and that answer is
    /// cached for the origin like any other.
    pub async fn allowed(&mut self, url: &Url) -> bool {
        if !self.respect_robots {
            return true;
        }

        let Some(origin) = origin_of(url) else {
            tracing::warn!("Cannot resolve origin of {}, allowing", url);
            return true;
        };

        if let Some(robots) = self.robots.get(&origin) {
            tracing::debug!("Using cached robots.txt for {}", origin);
            return robots.is_allowed(url.as_str(), ROBOTS_AGENT);
        }

        tracing::debug!("Fetching robots.txt for {}", origin);
        let robots = match fetch_robots(&self.client, &origin).await {
            Ok(robots) => robots,
            Err(e) => {
                tracing::warn!("{}; allowing all URLs for this origin", e);
                ParsedRobots::allow_all()
            }
        };

        self.robots
            .insert(origin, robots)
            .is_allowed(url.as_str(), ROBOTS_AGENT)
    }

    /// Waits out the rate limit before the next fetch
    pub async fn throttle(&self) {
        self.limiter.wait().await;
    }

    /// Starts the rate-limit interval for a fetch that robots.txt permitted
    pub fn record_fetch(&mut self) {
        self.limiter.mark();
    }

    /// Number of origins with a cached robots policy
    pub fn cached_origins(&self) -> usize {
        self.robots.origin_count()
    }

    /// Drops cached robots policies and the rate-limit clock
    pub fn reset(&mut self) {
        self.robots.clear();
        self.limiter.reset();
    }
}
