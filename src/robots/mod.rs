//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching robots.txt files.

mod cache;
mod parser;

pub use cache::RobotsCache;
pub use parser::ParsedRobots;

use reqwest::Client;
use thiserror::Error;

/// Errors that can occur while retrieving robots.txt
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Failed to fetch robots.txt from {origin}: {source}")]
    Http {
        origin: String,
        source: reqwest::Error,
    },

    #[error("robots.txt at {origin} returned HTTP {status}")]
    Status { origin: String, status: u16 },
}

/// Fetches robots.txt for an origin
///
/// # Arguments
///
/// * `client` - The HTTP client (already carrying the crawler's user agent)
/// * `origin` - The origin, e.g. `https://example.com` or `http://127.0.0.1:8080`
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - The parsed file; an allow-all policy when the
///   origin answers with a 4xx status (no robots.txt)
/// * `Err(RobotsError)` - Transport failure or server error
pub async fn fetch_robots(client: &Client, origin: &str) -> Result<ParsedRobots, RobotsError> {
    let robots_url = format!("{}/robots.txt", origin.trim_end_matches('/'));

    let response = client
        .get(&robots_url)
        .send()
        .await
        .map_err(|source| RobotsError::Http {
            origin: origin.to_string(),
            source,
        })?;

    let status = response.status();
    if status.is_client_error() {
        tracing::debug!("No robots.txt at {} (HTTP {})", origin, status.as_u16());
        return Ok(ParsedRobots::allow_all());
    }

    if !status.is_success() {
        return Err(RobotsError::Status {
            origin: origin.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| RobotsError::Http {
        origin: origin.to_string(),
        source,
    })?;

    Ok(ParsedRobots::from_content(&body))
}
