use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Unknown compression level: {0}")]
    UnknownLevel(String),
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum RefineryError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RefineryError>;
