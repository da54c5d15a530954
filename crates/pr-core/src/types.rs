use crate::config::{Format, Level, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Text deleted during refinement and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedSegment {
    pub text: String,
    pub reason: String,
}

impl RemovedSegment {
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { text: text.into(), reason: reason.into() }
    }
}

/// Heuristic quality scores, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub integrity: f64,
    pub efficiency: f64,
    pub complexity: f64,
}

/// Repeated-trigram report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    /// Escaped input with repeated phrases wrapped in `<mark>`.
    pub html: String,
    /// One per sentence window whose trigram occurs more than once.
    pub leaks: usize,
    pub repeated_phrases: BTreeSet<String>,
}

impl DiagnosticResult {
    pub fn is_clean(&self) -> bool {
        self.leaks == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub original_text: String,
    pub refined_text: String,
    pub estimated_original_tokens: usize,
    pub estimated_refined_tokens: usize,
    pub savings_percentage: f64,
    pub removed_segments: Vec<RemovedSegment>,
    pub scores: Scores,
    pub explanation: String,
    pub strategy: Strategy,
    pub level: Level,
    pub format: Format,
    /// Passes actually run.
    pub iterations: usize,
    pub elapsed_ms: u64,
}

impl RefinementResult {
    pub fn tokens_saved(&self) -> usize {
        self.estimated_original_tokens
            .saturating_sub(self.estimated_refined_tokens)
    }
}
