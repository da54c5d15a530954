//! Refinement pipeline: runs the six stages, then scores and explains the result.

use crate::analysis::{analyze, compute_scores, explanation};
use crate::removal::RemovalLog;
use crate::{stage1_redundant, stage2_filler, stage3_level, stage4_strategy, stage5_format, stage6_cleanup};
use pr_core::{savings_percentage, CharEstimator, RefinementResult, RefineryConfig, Result, TokenCounter};
use std::time::Instant;
use tracing::{debug, debug_span};

/// A validated configuration plus the token counter used for savings.
pub struct RefineryPipeline {
    config: RefineryConfig,
    counter: Box<dyn TokenCounter>,
}

impl RefineryPipeline {
    pub fn new(config: RefineryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, counter: Box::new(CharEstimator) })
    }

    pub fn with_counter(mut self, counter: impl TokenCounter + 'static) -> Self {
        self.counter = Box::new(counter);
        self
    }

    pub fn config(&self) -> &RefineryConfig {
        &self.config
    }

    pub fn counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    /// One pass of stages 1–6.
    pub fn run_pass(&self, text: &str, log: &mut RemovalLog) -> String {
        let cfg = &self.config;
        let text = stage1_redundant::apply(text, log);
        debug!(stage = "redundant", len = text.len(), removed = log.len());
        let text = stage2_filler::apply(&text, log);
        debug!(stage = "filler", len = text.len(), removed = log.len());
        let text = stage3_level::apply(&text, cfg.level, log);
        debug!(stage = "level", level = %cfg.level, len = text.len(), removed = log.len());
        let text = stage4_strategy::apply(&text, cfg.strategy, log);
        debug!(stage = "strategy", strategy = %cfg.strategy, len = text.len(), removed = log.len());
        let text = stage5_format::apply(&text, cfg.format, cfg.level, log);
        debug!(stage = "format", format = %cfg.format, len = text.len(), removed = log.len());
        let text = stage6_cleanup::apply(&text);
        debug!(stage = "cleanup", len = text.len());
        text
    }

    /// Run up to `max_iterations` passes, stopping once a pass changes nothing.
    pub fn refine(&self, text: &str) -> RefinementResult {
        let started = Instant::now();
        let mut log = RemovalLog::new(&self.config.preserve_keywords);

        let mut refined = text.to_string();
        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            iterations += 1;
            let _span = debug_span!("refine_pass", pass = iterations).entered();
            let next = self.run_pass(&refined, &mut log);
            let converged = next == refined;
            refined = next;
            if converged {
                break;
            }
        }

        let original_tokens = self.counter.count(text);
        let refined_tokens = self.counter.count(&refined);
        let savings = savings_percentage(original_tokens, refined_tokens);
        let scores = compute_scores(&analyze(text), &analyze(&refined), savings, self.config.level);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let explanation = explanation(&self.config, savings, log.len(), iterations, elapsed_ms);

        debug!(
            original_tokens,
            refined_tokens,
            savings,
            removed = log.len(),
            iterations,
            counter = self.counter.name(),
            "refinement complete"
        );

        RefinementResult {
            original_text: text.to_string(),
            refined_text: refined,
            estimated_original_tokens: original_tokens,
            estimated_refined_tokens: refined_tokens,
            savings_percentage: savings,
            removed_segments: log.into_segments(),
            scores,
            explanation,
            strategy: self.config.strategy,
            level: self.config.level,
            format: self.config.format,
            iterations,
            elapsed_ms,
        }
    }
}

impl Default for RefineryPipeline {
    fn default() -> Self {
        Self { config: RefineryConfig::default(), counter: Box::new(CharEstimator) }
    }
}

/// Refine with the length-based token estimate. Fails only on an invalid config.
pub fn refine(text: &str, config: &RefineryConfig) -> Result<RefinementResult> {
    Ok(RefineryPipeline::new(config.clone())?.refine(text))
}
