//! Plain-text report and links list

use crate::extract::PageRecord;
use crate::state::{CrawlStats, PageMap};
use chrono::SecondsFormat;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "═".repeat(RULE_WIDTH)
}

/// Renders the accumulated pages as a text report
///
/// The report opens with a banner and a summary box, followed by one block
/// per page in visitation order. Output depends only on its inputs, so
/// rendering twice without crawling yields identical text.
pub fn render_text(pages: &PageMap, stats: &CrawlStats) -> String {
    let mut out = String::new();

    let banner = format!(" SCRAPED CONTENT FROM {} PAGES", pages.len());
    out.push_str(&format!("╔{}╗\n", "═".repeat(78)));
    out.push_str(&format!("║{:^78}║\n", banner));
    out.push_str(&format!("╚{}╝\n\n", "═".repeat(78)));

    out.push_str(&format!("┌{:─^76}┐\n", " SUMMARY "));
    for line in summary_lines(pages, stats) {
        out.push_str(&format!("│ {:<75}│\n", line));
    }
    out.push_str(&format!("└{}┘\n\n", "─".repeat(76)));
    out.push_str(&rule());
    out.push_str("\n\n");

    for record in pages.iter() {
        out.push_str(&render_page(record));
        out.push_str("\n\n");
        out.push_str(&rule());
        out.push_str("\n\n");
    }

    out
}

fn summary_lines(pages: &PageMap, stats: &CrawlStats) -> Vec<String> {
    let mut lines = vec![
        format!("Total URLs visited:     {}", stats.pages_visited),
        format!("Successful fetches:     {}", stats.successful_fetches),
        format!("Failed fetches:         {}", stats.failed_fetches),
        format!("Content extracted from: {} pages", pages.extracted_count()),
    ];

    if let Some(started) = stats.started_at {
        lines.push(format!(
            "Started:                {}",
            started.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    if let Some(finished) = stats.finished_at {
        lines.push(format!(
            "Finished:               {}",
            finished.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    if let Some(elapsed) = stats.elapsed() {
        lines.push(format!(
            "Duration:               {:.1}s",
            elapsed.num_milliseconds() as f64 / 1000.0
        ));
    }

    lines
}

fn render_page(record: &PageRecord) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "URL: {}", record.url);
    let _ = writeln!(out, "TITLE: {}", record.title);
    let _ = writeln!(out, "{}\n", rule());

    if !record.toc.is_empty() {
        out.push_str("TABLE OF CONTENTS\n");
        out.push_str("-----------------\n");
        for entry in &record.toc {
            let _ = writeln!(out, "- {}", entry.label);
        }
        out.push('\n');
    }

    out.push_str(&record.body);
    out.push_str("\n\n");

    if !record.code_blocks.is_empty() {
        out.push_str("CODE EXAMPLES\n");
        out.push_str("-------------\n\n");
        for (i, block) in record.code_blocks.iter().enumerate() {
            let _ = writeln!(out, "Example {} ({}):", i + 1, block.language);
            let _ = writeln!(out, "```\n{}\n```\n", block.content);
        }
    }

    out
}

/// Renders visited URLs as a numbered list
///
/// # Examples
///
/// ```
/// use docsweep::output::render_links;
///
/// let links = vec!["https://example.com/".to_string()];
/// assert_eq!(render_links(&links), "Found 1 links:\n\n1. https://example.com/\n");
/// ```
pub fn render_links(visited: &[String]) -> String {
    let mut out = format!("Found {} links:\n\n", visited.len());
    for (i, url) in visited.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, url);
    }
    out
}
