//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the HTTP client with the crawler's user agent and timeout
//! - GET requests to fetch page content
//! - Error classification (HTTP status vs. transport failures)
//!
//! There are no retries: a failed fetch is reported once and the engine moves
//! on to the next URL.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// User agent sent with every request, robots.txt included
pub const USER_AGENT: &str = concat!(
    "Docsweep/",
    env!("CARGO_PKG_VERSION"),
    " (documentation crawler)"
);

/// Product token matched against robots.txt `User-agent` lines
pub const ROBOTS_AGENT: &str = "Docsweep";

/// Timeout for a single request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons a page fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl FetchError {
    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }
}

/// Builds the HTTP client shared by the fetcher and the robots.txt lookups
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. no TLS backend)
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues page requests on behalf of the engine
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and returns its body text
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The body of a 2xx response
    /// * `Err(FetchError)` - Non-2xx status, timeout or transport failure
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}
