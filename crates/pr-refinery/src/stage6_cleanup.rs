//! Stage 6: final cleanup. Idempotent.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[.!?]+\s*)+$").unwrap());

/// Whitespace runs become one space, or one line break if the run had one.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE
        .replace_all(text, |caps: &Captures| {
            if caps[0].contains('\n') { "\n" } else { " " }
        })
        .trim()
        .to_string()
}

pub fn strip_trailing_punctuation(text: &str) -> String {
    RE_TRAILING_PUNCT.replace(text, "").trim_end().to_string()
}

/// Uppercases the first character, even when it starts a preserved segment.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn apply(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let stripped = strip_trailing_punctuation(&collapsed);
    capitalize_first(&stripped)
}
