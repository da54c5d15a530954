//! Shared model for the prompt refinery: configuration, records, errors and
//! token counting.

pub mod config;
pub mod error;
pub mod tokens;
pub mod types;

pub use config::{Format, Level, RefineryConfig, Strategy};
pub use error::{ConfigError, RefineryError, Result};
pub use tokens::{savings_percentage, CharEstimator, TokenCounter};
pub use types::{DiagnosticResult, RefinementResult, RemovedSegment, Scores};

#[cfg(feature = "tiktoken")]
pub use tokens::TiktokenCounter;
