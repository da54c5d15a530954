//! Lexical analysis, quality scores and the result explanation.

use pr_core::{Level, RefineryConfig, Scores};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());
static RE_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

const INTEGRITY_BASE: f64 = 80.0;
const AGGRESSIVE_PENALTY: f64 = 10.0;
const LIGHT_BONUS: f64 = 5.0;
const COMPLEXITY_DROP_THRESHOLD: f64 = -10.0;
const COMPLEXITY_DROP_PENALTY: f64 = 5.0;

/// Surface statistics of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    pub total_words: usize,
    pub total_sentences: usize,
    pub total_paragraphs: usize,
    pub avg_words_per_sentence: f64,
    pub complexity: f64,
}

pub fn analyze(text: &str) -> TextAnalysis {
    let total_words = text.split_whitespace().count();
    let total_sentences = RE_SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let total_paragraphs = RE_PARAGRAPH
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();
    TextAnalysis {
        total_words,
        total_sentences,
        total_paragraphs,
        avg_words_per_sentence: total_words as f64 / total_sentences.max(1) as f64,
        complexity: complexity_score(text),
    }
}

/// Length, sentence length and vocabulary bands, capped at 100.
pub fn complexity_score(text: &str) -> f64 {
    let mut score: f64 = 0.0;

    let len = text.chars().count();
    if len > 2000 {
        score += 20.0;
    } else if len > 1000 {
        score += 10.0;
    } else if len > 500 {
        score += 5.0;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len().max(1) as f64;
    // Counts the empty piece after a final terminator, like a plain split.
    let sentence_count = RE_SENTENCE_END.split(text).count().max(1) as f64;
    let avg_sentence_len = words.len() as f64 / sentence_count;
    if avg_sentence_len > 25.0 {
        score += 15.0;
    } else if avg_sentence_len > 15.0 {
        score += 10.0;
    } else if avg_sentence_len > 10.0 {
        score += 5.0;
    }

    let unique: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let vocab_ratio = unique.len() as f64 / word_count;
    if vocab_ratio > 0.6 {
        score += 10.0;
    } else if vocab_ratio > 0.4 {
        score += 5.0;
    }

    score.min(100.0)
}

pub fn compute_scores(
    original: &TextAnalysis,
    refined: &TextAnalysis,
    savings_percentage: f64,
    level: Level,
) -> Scores {
    let mut integrity = INTEGRITY_BASE;
    match level {
        Level::Aggressive => integrity -= AGGRESSIVE_PENALTY,
        Level::Light => integrity += LIGHT_BONUS,
        Level::Balanced => {}
    }
    if refined.complexity - original.complexity < COMPLEXITY_DROP_THRESHOLD {
        integrity -= COMPLEXITY_DROP_PENALTY;
    }

    Scores {
        integrity: integrity.clamp(0.0, 100.0),
        efficiency: (savings_percentage * 2.0).clamp(0.0, 100.0),
        complexity: refined.complexity.clamp(0.0, 100.0),
    }
}

pub fn explanation(
    config: &RefineryConfig,
    savings_percentage: f64,
    removed: usize,
    iterations: usize,
    elapsed_ms: u64,
) -> String {
    let passes = if iterations == 1 { "pass" } else { "passes" };
    format!(
        "Local optimization completed in {elapsed_ms}ms ({iterations} {passes}).\n\
         Strategy: {}, Level: {}, Format: {}\n\
         Token savings: {savings_percentage:.1}%\n\
         Removed segments: {removed}\n\
         Integrity preserved through rule-based analysis.",
        config.strategy, config.level, config.format,
    )
}
