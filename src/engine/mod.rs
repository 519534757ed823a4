// ==========================================
// Tangos - engine layer
// ==========================================
// Responsibility: QD distances, overpressure, zone geometry, exposure
// Rule: pure computation, no I/O; features arrive already fetched
// ==========================================

pub mod blast;
pub mod classification;
pub mod error;
pub mod exposure;
pub mod orchestrator;
pub mod qd;
pub mod zones;

// Re-exports
pub use blast::{overpressure, overpressure_opt, scaled_distance, PressureRegime};
pub use classification::{category_of, classify, CategoryEntry, CATEGORY_TABLE};
pub use error::{AnalysisError, EngineResult};
pub use exposure::ExposureResolver;
pub use orchestrator::{HazardAnalysisEngine, PreparedAnalysis};
pub use qd::{qd, QdCalculator, QdRule, QD_RULES};
pub use zones::ZoneGeometryBuilder;
