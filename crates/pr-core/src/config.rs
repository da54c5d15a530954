//! Refinery configuration.
//!
//! `Strategy`, `Level` and `Format` are closed sets. Parsing an unrecognized
//! label fails with a [`ConfigError`] instead of falling back to a default
//! branch, both through `FromStr` and through serde.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rewrite variant tuned for a target audience or domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    #[default]
    Universal,
    Gpt,
    Claude,
    DeepSeek,
    Legal,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Self::Universal,
        Self::Gpt,
        Self::Claude,
        Self::DeepSeek,
        Self::Legal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Universal => "Universal",
            Self::Gpt => "GPT-4 Optimized",
            Self::Claude => "Claude Optimized",
            Self::DeepSeek => "DeepSeek Optimized",
            Self::Legal => "Legal / Regulatory",
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "universal" => Ok(Self::Universal),
            "gpt" | "gpt-4" | "gpt-4 optimized" => Ok(Self::Gpt),
            "claude" | "claude optimized" => Ok(Self::Claude),
            "deepseek" | "deepseek optimized" => Ok(Self::DeepSeek),
            "legal" | "legal / regulatory" => Ok(Self::Legal),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Compression aggressiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Light,
    #[default]
    Balanced,
    Aggressive,
}

impl Level {
    pub const ALL: [Level; 3] = [Self::Light, Self::Balanced, Self::Aggressive];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }

    /// Levels whose stages only delete or shorten text.
    pub fn is_shrinking(&self) -> bool {
        matches!(self, Self::Balanced | Self::Aggressive)
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "balanced" | "medium" => Ok(Self::Balanced),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}

/// Output shape applied after the strategy rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    #[default]
    XmlTagged,
    Structured,
    Minimalist,
}

impl Format {
    pub const ALL: [Format; 3] = [Self::XmlTagged, Self::Structured, Self::Minimalist];

    pub fn label(&self) -> &'static str {
        match self {
            Self::XmlTagged => "XML Tags",
            Self::Structured => "Structured",
            Self::Minimalist => "Minimalist",
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xml" | "xml tags" | "xmltagged" | "xml-tagged" => Ok(Self::XmlTagged),
            "structured" => Ok(Self::Structured),
            "minimalist" | "minimal" => Ok(Self::Minimalist),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

macro_rules! label_conversions {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ConfigError;
            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.label().to_string()
            }
        }
    )*};
}

label_conversions!(Strategy, Level, Format);

/// Options recognized by the refinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefineryConfig {
    pub strategy: Strategy,
    pub level: Level,
    pub format: Format,
    /// Removable segments containing any of these (case-insensitive) are kept.
    pub preserve_keywords: Vec<String>,
    /// Upper bound on refinement passes; the pipeline stops early at a fixed point.
    pub max_iterations: usize,
}

impl Default for RefineryConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            level: Level::default(),
            format: Format::default(),
            preserve_keywords: Vec::new(),
            max_iterations: 1,
        }
    }
}

impl RefineryConfig {
    pub fn new(strategy: Strategy, level: Level, format: Format) -> Self {
        Self { strategy, level, format, ..Default::default() }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_preserve_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserve_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.max_iterations == 0 {
            Some("maxIterations must be at least 1".to_string())
        } else {
            self.preserve_keywords
                .iter()
                .position(|k| k.trim().is_empty())
                .map(|pos| format!("preserveKeywords[{pos}] is empty"))
        };
        match problem {
            Some(reason) => {
                debug!(%reason, strategy = %self.strategy, level = %self.level, "config rejected");
                Err(ConfigError::Invalid(reason))
            }
            None => Ok(()),
        }
    }
}
