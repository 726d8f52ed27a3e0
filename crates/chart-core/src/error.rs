// File: crates/chart-core/src/error.rs
// Summary: Error type for the few fallible engine entry points (parsing helpers, surfaces).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid color `{0}`: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("scene serialization failed")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
