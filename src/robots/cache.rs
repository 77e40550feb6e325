//! Per-origin robots.txt cache
//!
//! Entries live for the lifetime of a crawl; there is no expiry. The cache is
//! emptied when the engine is reset.

use crate::robots::ParsedRobots;
use std::collections::HashMap;

/// Mapping from origin (`scheme://host[:port]`) to its robots policy
#[derive(Debug, Default)]
pub struct RobotsCache {
    entries: HashMap<String, ParsedRobots>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached policy for an origin, if it has been fetched
    pub fn get(&self, origin: &str) -> Option<&ParsedRobots> {
        self.entries.get(origin)
    }

    /// Stores the policy for an origin and returns a reference to it
    pub fn insert(&mut self, origin: String, robots: ParsedRobots) -> &ParsedRobots {
        self.entries.entry(origin).or_insert(robots)
    }

    /// Number of origins with a cached policy
    pub fn origin_count(&self) -> usize {
        self.entries.len()
    }

    /// Drops every cached policy
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
