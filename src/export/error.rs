// ==========================================
// Tangos - export error types
// ==========================================
// An export either completes or produces nothing; no partial files
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Required field missing or non-finite
    #[error("encoding failed ({field}): {reason}")]
    Encoding { field: String, reason: String },

    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    pub fn encoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ExportError::Encoding {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias
pub type ExportResult<T> = Result<T, ExportError>;
