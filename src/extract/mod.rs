//! Content extraction: raw HTML to structured page records
//!
//! This module handles parsing HTML content to extract:
//! - The page title
//! - Readable body text (scripts, styles and page chrome stripped)
//! - Headings, code blocks and the table of contents
//! - Outbound links to follow
//!
//! Extraction is pluggable through the [`Extractor`] trait. Two
//! implementations ship with the crate and are selected by
//! [`ExtractorKind`](crate::config::ExtractorKind).

mod documentation;
mod generic;
mod highlight;
mod html;

pub use documentation::DocumentationExtractor;
pub use generic::GenericExtractor;
pub use highlight::{highlight_keywords, HIGHLIGHT_MARKER};

use crate::config::{CrawlConfig, ExtractorKind};
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors that can occur while extracting a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// A heading found on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1 through 6
    pub level: u8,
    pub text: String,
    /// Value of the `id` attribute, usable as an anchor
    pub id: Option<String>,
}

/// A block of example code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language from the block's class names, or "unknown"
    pub language: String,
    pub content: String,
}

/// One entry of a page's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub label: String,
    pub href: String,
}

/// Structured extraction result for one fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub body: String,
    pub headings: Vec<Heading>,
    pub code_blocks: Vec<CodeBlock>,
    pub toc: Vec<TocEntry>,
    /// Absolute, query-free, de-duplicated outbound links in page order
    pub links: Vec<String>,
}

impl PageRecord {
    /// A record with no content and no links
    ///
    /// Stored for pages whose HTML could not be extracted, so the page still
    /// counts as visited and is never retried.
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: url.to_string(),
            body: String::new(),
            headings: Vec::new(),
            code_blocks: Vec::new(),
            toc: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Returns true if nothing was extracted from the page
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
            && self.headings.is_empty()
            && self.code_blocks.is_empty()
            && self.toc.is_empty()
            && self.links.is_empty()
    }
}

/// Per-crawl settings that influence extraction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOptions {
    /// Drop links whose host differs from the page's host
    pub same_domain_only: bool,
    /// Keywords highlighted in the body text
    pub keywords: Vec<String>,
}

impl From<&CrawlConfig> for ExtractOptions {
    fn from(config: &CrawlConfig) -> Self {
        Self {
            same_domain_only: config.same_domain_only,
            keywords: config.keywords.clone(),
        }
    }
}

/// Turns the HTML of one page into a [`PageRecord`]
pub trait Extractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extracts a record from `html`, fetched from `base_url`
    fn extract(
        &self,
        base_url: &Url,
        html: &str,
        options: &ExtractOptions,
    ) -> Result<PageRecord, ExtractError>;
}

/// Builds the extractor selected by configuration
pub fn extractor_for(kind: ExtractorKind) -> Box<dyn Extractor> {
    match kind {
        ExtractorKind::Generic => Box::new(GenericExtractor),
        ExtractorKind::Documentation => Box::new(DocumentationExtractor),
    }
}

/// Assembles a record once an extractor has chosen the element holding the
/// page's main text
fn assemble_record(
    document: &Html,
    content_root: Option<ElementRef<'_>>,
    base_url: &Url,
    options: &ExtractOptions,
) -> Result<PageRecord, ExtractError> {
    let body = match content_root {
        Some(root) => html::extract_body_text(root),
        None => html::extract_body_text(document.root_element()),
    };

    Ok(PageRecord {
        url: base_url.to_string(),
        title: html::extract_title(document, base_url)?,
        body: highlight_keywords(&body, &options.keywords),
        headings: html::extract_headings(document)?,
        code_blocks: html::extract_code_blocks(document)?,
        toc: html::extract_toc(document)?,
        links: html::extract_links(document, base_url, options.same_domain_only)?,
    })
}
