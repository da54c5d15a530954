//! Token counting. The default is a length-based estimate; a BPE tokenizer
//! is available behind the `tiktoken` feature.

/// Counts tokens for savings reporting.
pub trait TokenCounter: Send + Sync {
    fn name(&self) -> &str;
    fn count(&self, text: &str) -> usize;
}

/// `ceil(chars / 4)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharEstimator;

impl TokenCounter for CharEstimator {
    fn name(&self) -> &str {
        "chars/4"
    }

    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(4)
    }
}

/// Percentage of tokens saved, never negative. Zero when `original` is zero.
pub fn savings_percentage(original: usize, refined: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    ((original as f64 - refined as f64) / original as f64 * 100.0).max(0.0)
}

#[cfg(feature = "tiktoken")]
mod bpe {
    use super::TokenCounter;
    use crate::error::{RefineryError, Result};
    use tiktoken_rs::CoreBPE;

    /// cl100k_base token counts.
    pub struct TiktokenCounter {
        bpe: CoreBPE,
    }

    impl TiktokenCounter {
        pub fn cl100k() -> Result<Self> {
            let bpe = tiktoken_rs::cl100k_base()
                .map_err(|e| RefineryError::Tokenizer(e.to_string()))?;
            Ok(Self { bpe })
        }
    }

    impl TokenCounter for TiktokenCounter {
        fn name(&self) -> &str {
            "cl100k_base"
        }

        fn count(&self, text: &str) -> usize {
            self.bpe.encode_ordinary(text).len()
        }
    }
}

#[cfg(feature = "tiktoken")]
pub use bpe::TiktokenCounter;
