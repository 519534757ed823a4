// ==========================================
// Tangos - data source layer
// ==========================================
// Responsibility: deliver candidate features per bounding box.
// Registry HTTP clients live outside this crate; they plug in through
// FeatureSource.
// ==========================================

pub mod building_types;
pub mod error;
pub mod feature_source;
pub mod file_source;

// Re-exports
pub use building_types::BuildingTypeRegistry;
pub use error::{SourceError, SourceResult};
pub use feature_source::{within_bbox, FeatureSource, InMemoryFeatureSource};
pub use file_source::{BuildingRow, FileFeatureSource, RoadRow};
