// ==========================================
// Tangos - core library
// ==========================================
// Explosive storage hazard zones: QD distances, blast overpressure,
// exposed buildings/roads and AMRISK 2.5 export
// Projections: UTM 33N (EPSG:32633, EPSG:25833/5973)
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Engine layer - QD, overpressure, zones, exposure
pub mod engine;

// Data source layer - collaborator boundary
pub mod source;

// Export layer - AMRISK file, exposure table
pub mod export;

// Configuration layer
pub mod config;

// Logging
pub mod logging;

// API layer - analysis entry point
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    AnalysisResult, BoundingBox, BuildingCategory, CandidateFeature, Crs, ExportRecord,
    ExposedObject, QdDistances, SafetyZone, StoragePoint, ZoneKind,
};

pub use engine::{overpressure, qd, AnalysisError, ExposureResolver, HazardAnalysisEngine, ZoneGeometryBuilder};

pub use export::{AmriskEncoder, ExportError};

pub use api::{AnalysisApi, ApiError};

pub use config::AnalysisConfig;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Tangos";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
