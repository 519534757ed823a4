// ==========================================
// Tangos - data source error types
// ==========================================
// A failed fetch is an error, never an empty feature set
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature query failed: {0}")]
    Query(String),
}

/// Result alias
pub type SourceResult<T> = Result<T, SourceError>;
