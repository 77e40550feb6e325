//! HTML helpers shared by the extractors

use super::{CodeBlock, ExtractError, Heading, TocEntry};
use crate::url::same_host;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements whose text never reaches the body text
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "nav", "header", "footer", "aside",
];

/// Elements that start and end a paragraph
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "body", "br", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li",
    "main", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

/// Table of contents containers, in priority order
const TOC_SELECTORS: &[&str] = &[
    "div.toc",
    "nav.toc",
    "div#table-of-contents",
    "nav#contents",
    "div.contents",
    "ul.toctree-wrapper",
    "div.toctree-wrapper",
];

/// Href prefixes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

pub(super) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Concatenated text of an element with whitespace collapsed
pub(super) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first `<title>`, or the page URL when missing or blank
pub(super) fn extract_title(document: &Html, base_url: &Url) -> Result<String, ExtractError> {
    let title_selector = selector("title")?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(collapsed_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| base_url.to_string()))
}

/// Headings h1-h6 in document order, skipping empty ones
pub(super) fn extract_headings(document: &Html) -> Result<Vec<Heading>, ExtractError> {
    let heading_selector = selector("h1, h2, h3, h4, h5, h6")?;

    let headings = document
        .select(&heading_selector)
        .filter_map(|element| {
            let text = collapsed_text(element);
            if text.is_empty() {
                return None;
            }

            let level = element.value().name()[1..].parse::<u8>().ok()?;
            let id = element
                .value()
                .id()
                .filter(|id| !id.is_empty())
                .map(str::to_string);

            Some(Heading { level, text, id })
        })
        .collect();

    Ok(headings)
}

/// Language named by a `language-*` or `lang-*` class token
fn language_from_classes<'a>(mut classes: impl Iterator<Item = &'a str>) -> Option<String> {
    classes.find_map(|class| {
        class
            .strip_prefix("language-")
            .or_else(|| class.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}

/// Language named by a `highlight-*` class on an enclosing element
fn language_from_highlight_ancestor(element: ElementRef<'_>) -> Option<String> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find_map(|ancestor| {
            ancestor.value().classes().find_map(|class| {
                class
                    .strip_prefix("highlight-")
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string)
            })
        })
}

/// Drops leading blank lines and trailing whitespace, keeping indentation
fn trim_code(raw: &str) -> String {
    raw.trim_end()
        .trim_start_matches(|c: char| c == '\n' || c == '\r')
        .to_string()
}

/// Code blocks: `<pre><code>`, bare `<pre>`, and `highlight*` divs
///
/// A highlight div that wraps a `<pre>` is not collected separately; the
/// `<pre>` inherits the div's `highlight-<lang>` language instead.
pub(super) fn extract_code_blocks(document: &Html) -> Result<Vec<CodeBlock>, ExtractError> {
    let pre_selector = selector("pre")?;
    let code_selector = selector("code")?;
    let div_selector = selector("div")?;

    let mut blocks = Vec::new();

    for pre in document.select(&pre_selector) {
        let (language, content) = match pre.select(&code_selector).next() {
            Some(code) => (
                language_from_classes(code.value().classes())
                    .or_else(|| language_from_classes(pre.value().classes())),
                code.text().collect::<String>(),
            ),
            None => (
                language_from_classes(pre.value().classes()),
                pre.text().collect::<String>(),
            ),
        };

        let content = trim_code(&content);
        if content.trim().is_empty() {
            continue;
        }

        let language = language
            .or_else(|| language_from_highlight_ancestor(pre))
            .unwrap_or_else(|| "unknown".to_string());

        blocks.push(CodeBlock { language, content });
    }

    for div in document.select(&div_selector) {
        let is_highlight = div
            .value()
            .classes()
            .any(|class| class.starts_with("highlight"));
        if !is_highlight || div.select(&pre_selector).next().is_some() {
            continue;
        }

        let content = trim_code(&div.text().collect::<String>());
        if content.trim().is_empty() {
            continue;
        }

        let language = language_from_classes(div.value().classes())
            .or_else(|| {
                div.value().classes().find_map(|class| {
                    class
                        .strip_prefix("highlight-")
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| "unknown".to_string());

        blocks.push(CodeBlock { language, content });
    }

    Ok(blocks)
}

/// Anchors of the first known table of contents container
pub(super) fn extract_toc(document: &Html) -> Result<Vec<TocEntry>, ExtractError> {
    let anchor_selector = selector("a")?;

    for css in TOC_SELECTORS {
        let container_selector = selector(css)?;
        let Some(container) = document.select(&container_selector).next() else {
            continue;
        };

        let entries = container
            .select(&anchor_selector)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?.trim();
                let label = collapsed_text(anchor);
                if href.is_empty() || label.is_empty() {
                    return None;
                }
                Some(TocEntry {
                    label,
                    href: href.to_string(),
                })
            })
            .collect();

        return Ok(entries);
    }

    Ok(Vec::new())
}

/// Resolves a link href to an absolute, query-free URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: and data: hrefs
/// - fragment-only hrefs (same page anchors)
/// - unparseable hrefs and non-HTTP(S) targets
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }
    if absolute.host_str().is_none() {
        return None;
    }

    absolute.set_query(None);
    absolute.set_fragment(None);
    Some(absolute)
}

/// Outbound links in first-seen order
pub(super) fn extract_links(
    document: &Html,
    base_url: &Url,
    same_domain_only: bool,
) -> Result<Vec<String>, ExtractError> {
    let anchor_selector = selector("a[href]")?;

    let mut page = base_url.clone();
    page.set_query(None);
    page.set_fragment(None);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(link) = resolve_link(href, base_url) else {
            continue;
        };

        if link == page {
            continue;
        }
        if same_domain_only && !same_host(&link, base_url) {
            continue;
        }

        let link = link.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    Ok(links)
}

/// Accumulates paragraphs of readable text
#[derive(Default)]
struct TextCollector {
    paragraphs: Vec<String>,
    current: String,
    pending_space: bool,
}

impl TextCollector {
    fn push_text(&mut self, raw: &str) {
        let mut words = raw.split_whitespace().peekable();
        if words.peek().is_none() {
            if !raw.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        if !self.current.is_empty() && (self.pending_space || raw.starts_with(char::is_whitespace))
        {
            self.current.push(' ');
        }

        for (i, word) in words.enumerate() {
            if i > 0 {
                self.current.push(' ');
            }
            self.current.push_str(word);
        }

        self.pending_space = raw.ends_with(char::is_whitespace);
    }

    fn break_paragraph(&mut self) {
        if !self.current.is_empty() {
            self.paragraphs.push(std::mem::take(&mut self.current));
        }
        self.pending_space = false;
    }

    fn finish(mut self) -> String {
        self.break_paragraph();
        self.paragraphs.join("\n\n")
    }
}

/// One pending step of the text walk
enum TextStep<'a> {
    Text(&'a str),
    Element(ElementRef<'a>),
    Break,
}

/// Walks the subtree under `root` in document order
///
/// Uses an explicit stack, so arbitrarily deep markup cannot exhaust the
/// call stack.
fn walk_text(root: ElementRef<'_>, out: &mut TextCollector) {
    let mut stack = vec![TextStep::Element(root)];

    while let Some(step) = stack.pop() {
        let element = match step {
            TextStep::Text(text) => {
                out.push_text(text);
                continue;
            }
            TextStep::Break => {
                out.break_paragraph();
                continue;
            }
            TextStep::Element(element) => element,
        };

        // Reversed so the first child is popped first
        for child in element.children().rev() {
            match child.value() {
                Node::Text(text) => stack.push(TextStep::Text(&text.text)),
                Node::Element(el) => {
                    let name = el.name();
                    if SKIPPED_ELEMENTS.contains(&name) {
                        continue;
                    }

                    let Some(child_element) = ElementRef::wrap(child) else {
                        continue;
                    };

                    let is_block = BLOCK_ELEMENTS.contains(&name);
                    if is_block {
                        stack.push(TextStep::Break);
                    }
                    stack.push(TextStep::Element(child_element));
                    if is_block {
                        stack.push(TextStep::Break);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Readable text under `root`, one paragraph per block element
///
/// Script, style, navigation, header, footer and aside subtrees are skipped.
/// Paragraphs are separated by a single blank line.
pub(super) fn extract_body_text(root: ElementRef<'_>) -> String {
    let mut collector = TextCollector::default();
    walk_text(root, &mut collector);
    collector.finish()
}
