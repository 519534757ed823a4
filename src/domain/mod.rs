// ==========================================
// Tangos - domain layer
// ==========================================
// Storage point, safety zones, candidate features, exposure results
// ==========================================

pub mod exposure;
pub mod feature;
pub mod storage;
pub mod types;
pub mod zone;

// Re-exports
pub use exposure::{
    AnalysisResult, ExportRecord, ExposedObject, ExposureRow, FeatureAnomaly, ObjectCategory,
    ZoneExposure,
};
pub use feature::{CandidateFeature, FeatureAttributes, FeatureGeometry, RoadTraffic};
pub use storage::StoragePoint;
pub use types::{BuildingCategory, Crs, FeatureKind, ZoneKind};
pub use zone::{BoundingBox, QdDistances, SafetyZone};
