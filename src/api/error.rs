// ==========================================
// Tangos - API error types
// ==========================================
// Responsibility: one error surface for front ends, keeping "computation
// failed" distinct from "no objects found" (which is not an error)
// ==========================================

use crate::engine::error::AnalysisError;
use crate::export::error::ExportError;
use crate::source::error::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Request / computation errors
    // ==========================================
    #[error("analysis rejected: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ==========================================
    // Data access errors
    // ==========================================
    #[error("feature retrieval failed: {0}")]
    Source(#[from] SourceError),

    // ==========================================
    // Export errors
    // ==========================================
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("nothing to export: no exposed objects selected for export")]
    NothingToExport,
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;
