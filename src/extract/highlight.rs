//! Keyword highlighting for extracted body text

/// Marker placed on both sides of a highlighted keyword
pub const HIGHLIGHT_MARKER: &str = "**";

/// Wraps every case-insensitive occurrence of a keyword in [`HIGHLIGHT_MARKER`]
///
/// Blank keywords are ignored. When keywords overlap, the longest one that
/// matches at a position wins and matching resumes after it, so a match is
/// never highlighted twice. The matched text keeps its original case.
///
/// # Examples
///
/// ```
/// use docsweep::extract::highlight_keywords;
///
/// let text = highlight_keywords("Hello world", &["hello".to_string()]);
/// assert_eq!(text, "**Hello** world");
/// ```
pub fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let mut needles: Vec<Vec<char>> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| k.chars().flat_map(char::to_lowercase).collect())
        .collect();

    if needles.is_empty() || text.is_empty() {
        return text.to_string();
    }

    needles.sort_by(|a, b| b.len().cmp(&a.len()));

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let matched = needles
            .iter()
            .find_map(|needle| match_len(&chars[i..], needle));

        match matched {
            Some(len) => {
                let start = chars[i].0;
                let end = chars.get(i + len).map_or(text.len(), |(byte, _)| *byte);
                out.push_str(HIGHLIGHT_MARKER);
                out.push_str(&text[start..end]);
                out.push_str(HIGHLIGHT_MARKER);
                i += len;
            }
            None => {
                out.push(chars[i].1);
                i += 1;
            }
        }
    }

    out
}

/// Number of haystack chars covered by `needle` at the start, if it matches
fn match_len(haystack: &[(usize, char)], needle: &[char]) -> Option<usize> {
    let mut pos = 0;

    for (consumed, &(_, c)) in haystack.iter().enumerate() {
        for lower in c.to_lowercase() {
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(consumed + 1);
        }
    }

    None
}
