use super::html::selector;
use super::{assemble_record, ExtractError, ExtractOptions, Extractor, PageRecord};
use scraper::Html;
use url::Url;

/// Containers that hold the main text of documentation pages, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "div.content",
    "div.document",
    "article",
    "main",
    "div.body",
    "div#content",
    "div.documentation",
    "div.section",
    "div.container",
];

/// Extractor tuned for documentation sites
///
/// Body text is taken from the first documentation content container
/// (Sphinx's `div.document`, `<article>`, `<main>`, ...) so sidebars and
/// version pickers outside it are left out. Falls back to `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentationExtractor;

impl Extractor for DocumentationExtractor {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn extract(
        &self,
        base_url: &Url,
        html: &str,
        options: &ExtractOptions,
    ) -> Result<PageRecord, ExtractError> {
        let document = Html::parse_document(html);

        let mut content = None;
        for css in CONTENT_SELECTORS {
            let content_selector = selector(css)?;
            if let Some(element) = document.select(&content_selector).next() {
                content = Some(element);
                break;
            }
        }

        if content.is_none() {
            let body_selector = selector("body")?;
            content = document.select(&body_selector).next();
        }

        assemble_record(&document, content, base_url, options)
    }
}
