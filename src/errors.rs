use thiserror::Error;

/// Error type that captures storage failures and rejected input.
#[derive(Debug, Error)]
pub enum LuminaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Invalid month key `{0}` (expected YYYY-MM)")]
    InvalidMonthKey(String),
    #[error("Invalid date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, LuminaError>;
