/// Number of lines in a snippet when no term matches.
pub const DEFAULT_SNIPPET_LINES: usize = 6;

/// Maximum number of characters in a snippet before truncation.
pub const DEFAULT_SNIPPET_MAX_CHARS: usize = 400;

/// Extract a snippet around the first line containing any of `terms`.
///
/// Returns `(snippet_text, start_line_number)` where start_line_number is
/// 1-indexed. If no term is found, returns the first few lines. Returns
/// `None` if the text is empty.
pub fn extract_snippet(text: &str, terms: &[String]) -> Option<(String, usize)> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return None;
    }

    let terms_lower: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    let mut match_idx = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_lower = line.to_lowercase();
        if terms_lower.iter().any(|t| line_lower.contains(t)) {
            match_idx = Some(idx);
            break;
        }
    }

    let (start, end) = if let Some(idx) = match_idx {
        let start = idx.saturating_sub(2);
        let end = (idx + 3).min(lines.len());
        (start, end)
    } else {
        (0, DEFAULT_SNIPPET_LINES.min(lines.len()))
    };

    let mut snippet = lines[start..end].join("\n");
    if snippet.len() > DEFAULT_SNIPPET_MAX_CHARS {
        // Walk back to a char boundary so the cut never splits a code point.
        let mut cut = DEFAULT_SNIPPET_MAX_CHARS;
        while !snippet.is_char_boundary(cut) {
            cut -= 1;
        }
        snippet.truncate(cut);
        snippet.push_str("...");
    }

    Some((snippet, start + 1))
}
