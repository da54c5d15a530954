//! Stage 5: output-shape rewrites. Exactly one branch runs.

use crate::removal::{phrase_regex, remove_matches, RemovalLog};
use crate::stage3_level::{collapse_whitespace, ARTICLE_REASON, RE_ARTICLE};
use pr_core::{Format, Level};
use regex::Regex;
use std::sync::LazyLock;

pub const PLEASANTRY_REASON: &str = "Pleasantry removed";

static RE_SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+([A-Z])").unwrap());
static RE_SENTENCE_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s*([A-Z])").unwrap());
static RE_PLEASANTRY: LazyLock<Regex> =
    LazyLock::new(|| phrase_regex("please|kindly|thank you|regards"));

/// One sentence per line. Only the whitespace between sentences is replaced.
pub fn break_sentences(text: &str) -> String {
    RE_SENTENCE_BREAK.replace_all(text, "${1}\n${2}").into_owned()
}

/// Like [`break_sentences`], but also splits sentences with no space between
/// them ("Done.Next"). This can lengthen the text.
pub fn split_sentences(text: &str) -> String {
    RE_SENTENCE_JOIN.replace_all(text, "${1}\n${2}").into_owned()
}

fn minimalist(text: &str, log: &mut RemovalLog) -> String {
    let result = remove_matches(text, &RE_PLEASANTRY, PLEASANTRY_REASON, log);
    let result = remove_matches(&result, &RE_ARTICLE, ARTICLE_REASON, log);
    collapse_whitespace(&result)
}

pub fn apply(text: &str, format: Format, level: Level, log: &mut RemovalLog) -> String {
    match format {
        // Tags are added by the caller.
        Format::XmlTagged => text.to_string(),
        Format::Structured if level.is_shrinking() => break_sentences(text),
        Format::Structured => split_sentences(text),
        Format::Minimalist => minimalist(text, log),
    }
}
