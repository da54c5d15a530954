//! Stage 4: strategy-specific rewrites. Exactly one branch runs.

use crate::removal::{phrase_regex, remove_matches, rewrite_matches, RemovalLog};
use pr_core::Strategy;
use regex::Regex;
use std::sync::LazyLock;

pub const POLITENESS_REASON: &str = "Politeness marker removed";
pub const INTENSIFIER_REASON: &str = "Intensifier removed";

/// Legal doublets with a single-word equivalent. Nothing else is touched.
static LEGAL_DOUBLETS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (phrase_regex("and/or"), "or"),
        (phrase_regex("each and every"), "each"),
        (phrase_regex("full and complete"), "full"),
    ]
});

static RE_POLITENESS: LazyLock<Regex> = LazyLock::new(|| phrase_regex("please|could you|would you"));
static RE_ENSURE: LazyLock<Regex> = LazyLock::new(|| phrase_regex("be sure to|make sure to"));

static CLAUDE_CONNECTIVES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (phrase_regex("and also"), "and"),
        (phrase_regex("in addition to"), "plus"),
    ]
});

static RE_INTENSIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:very|really|quite)\b\s*").unwrap());
static RE_INTENSIFIED_ADJ: LazyLock<Regex> =
    LazyLock::new(|| phrase_regex("(?:so|very|really) (much|many|big|small)"));

fn rewrite_all(text: &str, rules: &[(Regex, &'static str)], log: &mut RemovalLog) -> String {
    let mut result = text.to_string();
    for (re, short) in rules {
        result = rewrite_matches(&result, re, short, log);
    }
    result
}

fn legal(text: &str, log: &mut RemovalLog) -> String {
    rewrite_all(text, &LEGAL_DOUBLETS, log)
}

fn gpt(text: &str, log: &mut RemovalLog) -> String {
    let result = remove_matches(text, &RE_POLITENESS, POLITENESS_REASON, log);
    let result = rewrite_matches(&result, &RE_ENSURE, "ensure", log);
    result.trim().to_string()
}

fn claude(text: &str, log: &mut RemovalLog) -> String {
    rewrite_all(text, &CLAUDE_CONNECTIVES, log).trim().to_string()
}

fn universal(text: &str, log: &mut RemovalLog) -> String {
    let result = remove_matches(text, &RE_INTENSIFIER, INTENSIFIER_REASON, log);
    let result = rewrite_matches(&result, &RE_INTENSIFIED_ADJ, "${1}", log);
    result.trim().to_string()
}

pub fn apply(text: &str, strategy: Strategy, log: &mut RemovalLog) -> String {
    match strategy {
        Strategy::Legal => legal(text, log),
        Strategy::Gpt => gpt(text, log),
        Strategy::Claude => claude(text, log),
        Strategy::Universal | Strategy::DeepSeek => universal(text, log),
    }
}
