//! Stage 2: hedges, discourse markers and existential openers.

use crate::removal::{phrase_regex, remove_matches, RemovalLog};
use regex::Regex;
use std::sync::LazyLock;

pub const REASON: &str = "Filler word removed";

const FILLERS: &[&str] = &[
    "just|simply|basically|essentially|literally|actually|really|very|quite|rather|pretty|so",
    "a little bit|kind of|sort of|somewhat|fairly",
    "that is|this is|it is|there is|here is",
    "in terms of|with regard to|in relation to|as far as",
    "maybe|perhaps|possibly|probably|likely",
    "well|now|then|okay|alright",
];

static PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| FILLERS.iter().map(|p| phrase_regex(p)).collect());

pub fn apply(text: &str, log: &mut RemovalLog) -> String {
    let mut result = text.to_string();
    for re in PATTERNS.iter() {
        result = remove_matches(&result, re, REASON, log);
    }
    result.trim().to_string()
}
