use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Invalid topology {topology}: {reason}")]
    InvalidTopology { topology: String, reason: String },

    #[error("Training failure: {0}")]
    TrainingFailure(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TopologyError>;
