use crate::output::OutputResult;
use crate::state::PageMap;

/// Renders pages as a pretty-printed JSON object keyed by URL
///
/// Keys appear in visitation order; each value is the full page record.
pub fn render_structured(pages: &PageMap) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(pages)?)
}
