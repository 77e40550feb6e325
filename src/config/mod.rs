//! Configuration module for Docsweep
//!
//! Crawl parameters can be built in code with [`CrawlConfig::new`] and its
//! `with_*` methods, or loaded from a TOML file with `[crawl]` and `[output]`
//! tables.
//!
//! # Example
//!
//! ```no_run
//! use docsweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docsweep.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawl.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, ExtractorKind, LinkOrder, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate_crawl_config;
