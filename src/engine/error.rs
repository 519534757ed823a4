// ==========================================
// Tangos - engine error types
// ==========================================
// Tool: thiserror derive
// ==========================================

use thiserror::Error;

/// Hazard analysis errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// NEQ <= 0, non-finite, or outside the configured operational bounds
    #[error("invalid net explosive quantity: {value} kg ({reason})")]
    InvalidQuantity { value: f64, reason: String },

    /// Malformed or non-finite coordinates
    #[error("invalid geometry for {subject}: {reason}")]
    InvalidGeometry { subject: String, reason: String },

    /// Overpressure inputs outside the model's domain
    #[error("overpressure not computable: distance={distance_m} m, neq={neq_kg} kg")]
    NotComputable { distance_m: f64, neq_kg: f64 },
}

impl AnalysisError {
    pub fn invalid_quantity(value: f64, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidQuantity {
            value,
            reason: reason.into(),
        }
    }

    pub fn invalid_geometry(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidGeometry {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias
pub type EngineResult<T> = Result<T, AnalysisError>;
