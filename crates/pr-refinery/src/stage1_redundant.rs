//! Stage 1: stock constructions that add no content.

use crate::removal::{phrase_regex, remove_matches, RemovalLog};
use regex::Regex;
use std::sync::LazyLock;

pub const REASON: &str = "Redundant phrase removed";

/// Applied in order; each group is one pattern.
const REDUNDANT_PHRASES: &[&str] = &[
    "in order to|in order for",
    "very (?:very|extremely|really)|really (?:really|very)",
    "(?:completely|totally|absolutely) (?:unnecessary|useless|pointless)",
    "start by|begin by|first of all",
    "as mentioned above|as stated earlier|as previously mentioned",
    "it is important to note that|it should be noted that|it is worth mentioning that",
    "in my opinion|in my view|from my perspective",
    "personally speaking|from my experience",
];

static PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| REDUNDANT_PHRASES.iter().map(|p| phrase_regex(p)).collect());

pub fn apply(text: &str, log: &mut RemovalLog) -> String {
    let mut result = text.to_string();
    for re in PATTERNS.iter() {
        result = remove_matches(&result, re, REASON, log);
    }
    result.trim().to_string()
}
