//! `<mark>` annotation of repeated phrases.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::warn;

const MARK_OPEN: &str = "<mark class=\"semantic-leak\">";
const MARK_CLOSE: &str = "</mark>";
const PATTERN_SIZE_LIMIT: usize = 1 << 22;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn phrase_pattern(phrases: &BTreeSet<String>) -> Option<Regex> {
    if phrases.is_empty() {
        return None;
    }
    // Longest first so the leftmost match prefers the longer phrase.
    let mut sorted: Vec<&String> = phrases.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alt = sorted
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    match RegexBuilder::new(&format!(r"\b(?:{alt})\b"))
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(phrases = phrases.len(), error = %e, "highlight pattern rejected");
            None
        }
    }
}

/// Byte ranges of `text` covered by any of `phrases` (case-insensitive,
/// whole-word, non-overlapping, in order).
pub fn highlight_spans(text: &str, phrases: &BTreeSet<String>) -> Vec<Range<usize>> {
    match phrase_pattern(phrases) {
        Some(re) => re.find_iter(text).map(|m| m.range()).collect(),
        None => Vec::new(),
    }
}

/// Escape `text` for HTML and wrap every span of a repeated phrase in `<mark>`.
pub fn highlight(text: &str, phrases: &BTreeSet<String>) -> String {
    let mut out = String::with_capacity(text.len() + phrases.len() * 32);
    let mut last = 0;
    for span in highlight_spans(text, phrases) {
        out.push_str(&escape_html(&text[last..span.start]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(&text[span.clone()]));
        out.push_str(MARK_CLOSE);
        last = span.end;
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
