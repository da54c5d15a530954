//! Stage 3: level-specific compression.

use crate::removal::{phrase_regex, remove_matches, rewrite_matches, RemovalLog};
use pr_core::Level;
use regex::Regex;
use std::sync::LazyLock;

pub const ARTICLE_REASON: &str = "Article removed";

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_REPEATED_PUNCT: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\.(?:\s*\.)+").unwrap(), "."),
        (Regex::new(r"!(?:\s*!)+").unwrap(), "!"),
        (Regex::new(r"\?(?:\s*\?)+").unwrap(), "?"),
    ]
});
pub(crate) static RE_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:a|an|the)\s+").unwrap());
static CONTRACTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (phrase_regex("in order to"), "to"),
        (phrase_regex("because of the fact that"), "because"),
        (phrase_regex("in the event that"), "if"),
    ]
});

/// Collapse every whitespace run to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// "!!" → "!", "? ?" → "?".
pub fn collapse_punctuation(text: &str) -> String {
    let mut result = text.to_string();
    for (re, single) in RE_REPEATED_PUNCT.iter() {
        result = re.replace_all(&result, *single).into_owned();
    }
    result
}

fn balanced(text: &str) -> String {
    collapse_punctuation(&collapse_whitespace(text))
}

fn aggressive(text: &str, log: &mut RemovalLog) -> String {
    let mut result = balanced(text);
    for (re, short) in CONTRACTIONS.iter() {
        result = rewrite_matches(&result, re, short, log);
    }
    remove_matches(&result, &RE_ARTICLE, ARTICLE_REASON, log)
}

pub fn apply(text: &str, level: Level, log: &mut RemovalLog) -> String {
    match level {
        Level::Light => text.to_string(),
        Level::Balanced => balanced(text),
        Level::Aggressive => aggressive(text, log),
    }
}
