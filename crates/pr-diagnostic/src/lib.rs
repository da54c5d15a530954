//! Repetition diagnostic ("semantic leaks").
//!
//! Every 3-word window of every sentence is looked up in the whole
//! lower-cased document with whole-word matching. A window whose phrase
//! occurs more than once counts as one leak; the phrase itself is reported
//! once.

pub mod highlight;
pub mod index;

pub use highlight::{escape_html, highlight, highlight_spans};
pub use index::{count_occurrences, count_whole_word, TrigramIndex};

use pr_core::DiagnosticResult;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

/// Inputs shorter than this (in chars) report nothing.
pub const MIN_TEXT_LEN: usize = 20;
/// Sentences must be longer than this (in chars) to be scanned.
pub const MIN_SENTENCE_LEN: usize = 10;
/// Window size in words.
pub const NGRAM: usize = 3;

static RE_SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Split on runs of `.`, `!`, `?`, trim, and keep sentences long enough to scan.
pub fn sentences(text: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_LEN)
        .collect()
}

/// Lower-cased 3-word windows of one sentence, in order.
pub fn trigrams(sentence: &str) -> Vec<String> {
    let lower = sentence.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    words.windows(NGRAM).map(|w| w.join(" ")).collect()
}

/// Count repeated trigrams and annotate them.
pub fn diagnose(text: &str) -> DiagnosticResult {
    if text.chars().count() < MIN_TEXT_LEN {
        return DiagnosticResult {
            html: escape_html(text),
            ..Default::default()
        };
    }

    let lower = text.to_lowercase();
    let windows: Vec<String> = sentences(text).into_iter().flat_map(trigrams).collect();
    let index = TrigramIndex::build(&lower, windows.iter().map(String::as_str));

    let mut leaks = 0;
    let mut repeated_phrases = BTreeSet::new();
    for gram in &windows {
        if index.get(gram) > 1 {
            leaks += 1;
            repeated_phrases.insert(gram.clone());
        }
    }

    debug!(
        windows = windows.len(),
        distinct = index.len(),
        leaks,
        phrases = repeated_phrases.len(),
        "repetition diagnostic"
    );

    let html = highlight(text, &repeated_phrases);
    DiagnosticResult { html, leaks, repeated_phrases }
}
