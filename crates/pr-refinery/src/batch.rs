//! Batch refinement with an aggregate savings summary.

use crate::pipeline::RefineryPipeline;
use chrono::{DateTime, Utc};
use pr_core::RefinementResult;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// USD per 1k tokens used for the savings estimate.
pub const DEFAULT_PRICE_PER_1K: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Completed,
    /// Blank input; nothing to refine.
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: Uuid,
    pub original: String,
    pub result: Option<RefinementResult>,
    pub status: BatchStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_prompts: usize,
    pub total_original_tokens: usize,
    pub total_refined_tokens: usize,
    pub total_savings_percent: f64,
    pub estimated_dollar_savings: f64,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem], price_per_1k: f64) -> Self {
        let (orig, refined) = items
            .iter()
            .filter_map(|i| i.result.as_ref())
            .fold((0, 0), |(o, r), res| {
                (o + res.estimated_original_tokens, r + res.estimated_refined_tokens)
            });
        let saved = orig.saturating_sub(refined);
        Self {
            total_prompts: items.len(),
            total_original_tokens: orig,
            total_refined_tokens: refined,
            total_savings_percent: pr_core::savings_percentage(orig, refined),
            estimated_dollar_savings: saved as f64 / 1000.0 * price_per_1k,
        }
    }

    pub fn tokens_saved(&self) -> usize {
        self.total_original_tokens.saturating_sub(self.total_refined_tokens)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub summary: BatchSummary,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn completed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|i| i.status == BatchStatus::Completed)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Refine each prompt in order with the same pipeline.
pub fn refine_batch<I, S>(prompts: I, pipeline: &RefineryPipeline) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    refine_batch_priced(prompts, pipeline, DEFAULT_PRICE_PER_1K)
}

pub fn refine_batch_priced<I, S>(prompts: I, pipeline: &RefineryPipeline, price_per_1k: f64) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let started_at = Utc::now();
    let items: Vec<BatchItem> = prompts
        .into_iter()
        .map(|p| {
            let original: String = p.into();
            let (result, status) = if original.trim().is_empty() {
                (None, BatchStatus::Skipped)
            } else {
                (Some(pipeline.refine(&original)), BatchStatus::Completed)
            };
            BatchItem { id: Uuid::new_v4(), original, result, status }
        })
        .collect();

    let summary = BatchSummary::from_items(&items, price_per_1k);
    info!(
        prompts = summary.total_prompts,
        saved = summary.tokens_saved(),
        savings_percent = summary.total_savings_percent,
        "batch refinement complete"
    );

    BatchReport { items, summary, started_at, finished_at: Utc::now() }
}
