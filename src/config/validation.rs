use crate::config::types::{Config, CrawlConfig, OutputConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration file
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the parameters of a crawl
///
/// This runs once at the start of every crawl; it is the only check whose
/// failure is reported to the caller as a crawl-level error.
pub fn validate_crawl_config(config: &CrawlConfig) -> ConfigResult<()> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be at least 1, got {}",
            config.max_pages
        )));
    }

    if !config.rate_limit.is_finite() || config.rate_limit < 0.0 {
        return Err(ConfigError::Validation(format!(
            "rate_limit must be a non-negative number of seconds, got {}",
            config.rate_limit
        )));
    }

    validate_seed(&config.seed)?;

    Ok(())
}

/// Validates the seed URL: absolute, HTTP(S), with a host
fn validate_seed(seed: &str) -> ConfigResult<()> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "'{}' must use the http or https scheme",
            seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!("'{}' has no host", seed)));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.text_path.is_empty() {
        return Err(ConfigError::Validation(
            "text_path cannot be empty".to_string(),
        ));
    }

    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.links_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "links_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
