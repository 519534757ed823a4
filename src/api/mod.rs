// ==========================================
// Tangos - API layer
// ==========================================
// Responsibility: analysis entry point for front ends (CLI, services)
// ==========================================

pub mod analysis_api;
pub mod error;

// Re-exports
pub use analysis_api::AnalysisApi;
pub use error::{ApiError, ApiResult};
