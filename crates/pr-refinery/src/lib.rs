//! Prompt Refinery: rule-based prompt compression.
//!
//! Stages, applied in this order on every pass:
//! 1. Redundant phrases: stock multi-word constructions
//! 2. Filler words: hedges, discourse markers, vague quantifiers
//! 3. Level: whitespace/punctuation collapse, articles, verbose constructions
//! 4. Strategy: audience-specific rewrites (Legal, GPT, Claude, Universal)
//! 5. Format: output shape (XML tags, structured, minimalist)
//! 6. Cleanup: whitespace, trailing punctuation, capitalization

pub mod analysis;
pub mod batch;
pub mod pipeline;
pub mod removal;
pub mod stage1_redundant;
pub mod stage2_filler;
pub mod stage3_level;
pub mod stage4_strategy;
pub mod stage5_format;
pub mod stage6_cleanup;

pub use batch::{refine_batch, refine_batch_priced, BatchItem, BatchReport, BatchStatus, BatchSummary};
pub use pipeline::{refine, RefineryPipeline};
pub use pr_core::{
    Format, Level, RefinementResult, RefineryConfig, RefineryError, RemovedSegment, Scores,
    Strategy,
};
pub use removal::RemovalLog;

#[cfg(test)]
mod tests;
