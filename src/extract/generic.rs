use super::html::selector;
use super::{assemble_record, ExtractError, ExtractOptions, Extractor, PageRecord};
use scraper::Html;
use url::Url;

/// Extractor for arbitrary pages
///
/// Body text covers the whole `<body>` (minus scripts, styles and page chrome).
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(
        &self,
        base_url: &Url,
        html: &str,
        options: &ExtractOptions,
    ) -> Result<PageRecord, ExtractError> {
        let document = Html::parse_document(html);
        let body_selector = selector("body")?;
        let body = document.select(&body_selector).next();

        assemble_record(&document, body, base_url, options)
    }
}
