//! Summary figures about the extracted content

use crate::state::PageMap;
use std::collections::HashMap;
use std::fmt::Write;

/// Aggregate view of the code and headings across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct ContentAnalysis {
    pub pages: usize,
    pub pages_with_code: usize,
    pub total_code_blocks: usize,
    /// Code block count per language, most frequent first
    pub languages: Vec<(String, usize)>,
    pub average_headings: f64,
}

impl ContentAnalysis {
    pub fn from_pages(pages: &PageMap) -> Self {
        let mut languages: HashMap<&str, usize> = HashMap::new();
        let mut pages_with_code = 0;
        let mut total_code_blocks = 0;
        let mut total_headings = 0;

        for record in pages.iter() {
            if !record.code_blocks.is_empty() {
                pages_with_code += 1;
            }
            total_code_blocks += record.code_blocks.len();
            total_headings += record.headings.len();

            for block in &record.code_blocks {
                *languages.entry(block.language.as_str()).or_insert(0) += 1;
            }
        }

        let mut languages: Vec<(String, usize)> = languages
            .into_iter()
            .map(|(lang, count)| (lang.to_string(), count))
            .collect();
        // Ties broken by name so the output is stable
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let average_headings = if pages.is_empty() {
            0.0
        } else {
            total_headings as f64 / pages.len() as f64
        };

        Self {
            pages: pages.len(),
            pages_with_code,
            total_code_blocks,
            languages,
            average_headings,
        }
    }
}

/// Formats an analysis for the console
pub fn render_analysis(analysis: &ContentAnalysis) -> String {
    let mut out = String::from("Basic Analysis:\n");
    let _ = writeln!(out, "Pages with code examples: {}", analysis.pages_with_code);
    let _ = writeln!(out, "Total code blocks: {}", analysis.total_code_blocks);

    if !analysis.languages.is_empty() {
        out.push_str("Code languages:\n");
        for (lang, count) in &analysis.languages {
            let _ = writeln!(out, "  - {}: {}", lang, count);
        }
    }

    if analysis.pages > 0 {
        let _ = writeln!(
            out,
            "Average headings per page: {:.2}",
            analysis.average_headings
        );
    }

    out
}
