//! Output module for rendering crawl results
//!
//! This module handles:
//! - The plain-text report (banner, summary, one block per page)
//! - The structured JSON document keyed by URL
//! - The numbered links list and a short content analysis
//! - Writing rendered documents to disk
//!
//! Rendering is pure: every function takes the engine's state by reference
//! and can be called mid-crawl or repeatedly.

mod analysis;
mod report;
mod structured;

pub use analysis::{render_analysis, ContentAnalysis};
pub use report::{render_links, render_text};
pub use structured::render_structured;

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while producing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes a rendered document, creating missing parent directories
///
/// # Arguments
///
/// * `path` - Destination file; overwritten if it exists
/// * `content` - The rendered document
pub fn write_output(path: &Path, content: &str) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
