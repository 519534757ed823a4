// ==========================================
// Tangos - hazard analysis orchestrator
// ==========================================
// Flow: validate request -> QD -> zone geometry -> (features fetched by
// caller) -> exposure per zone -> AnalysisResult
// ==========================================
// Buildings are evaluated against all three zones, roads against the
// road zone only. Request validation errors abort before any zone work.
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::exposure::{AnalysisResult, ExposedObject};
use crate::domain::feature::CandidateFeature;
use crate::domain::storage::StoragePoint;
use crate::domain::types::ZoneKind;
use crate::domain::zone::{BoundingBox, QdDistances, SafetyZone};
use crate::engine::error::{AnalysisError, EngineResult};
use crate::engine::exposure::ExposureResolver;
use crate::engine::qd::QdCalculator;
use crate::engine::zones::ZoneGeometryBuilder;
use crate::source::building_types::BuildingTypeRegistry;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Validated request with its zones, ready for feature queries
#[derive(Debug, Clone)]
pub struct PreparedAnalysis {
    pub storage: StoragePoint,
    pub qd: QdDistances,
    pub zones: Vec<SafetyZone>,
}

impl PreparedAnalysis {
    pub fn zone(&self, kind: ZoneKind) -> Option<&SafetyZone> {
        self.zones.iter().find(|z| z.kind == kind)
    }

    /// Query rectangle for buildings: the largest (sensitive) zone
    pub fn building_query_bbox(&self) -> Option<BoundingBox> {
        self.zone(ZoneKind::Sensitive).map(|z| z.bbox)
    }

    /// Query rectangle for roads: the road zone
    pub fn road_query_bbox(&self) -> Option<BoundingBox> {
        self.zone(ZoneKind::Road).map(|z| z.bbox)
    }
}

// ==========================================
// HazardAnalysisEngine
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HazardAnalysisEngine {
    qd_calculator: QdCalculator,
    zone_builder: ZoneGeometryBuilder,
    type_names: Option<BuildingTypeRegistry>,
}

impl HazardAnalysisEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            qd_calculator: QdCalculator::new(config.min_neq_kg, config.max_neq_kg),
            zone_builder: ZoneGeometryBuilder::new(
                config.chord_tolerance_m,
                config.min_segments,
                config.max_segments,
            ),
            type_names: None,
        }
    }

    pub fn with_type_names(mut self, registry: BuildingTypeRegistry) -> Self {
        self.type_names = Some(registry);
        self
    }

    /// Validate the request and build the three zones
    ///
    /// # Errors
    /// - `InvalidGeometry`: storage coordinates not finite
    /// - `InvalidQuantity`: NEQ not positive/finite or outside operational bounds
    pub fn prepare(&self, storage: &StoragePoint) -> EngineResult<PreparedAnalysis> {
        if !storage.has_finite_coordinates() {
            return Err(AnalysisError::invalid_geometry(
                "storage point",
                format!("non-finite coordinates ({}, {})", storage.x, storage.y),
            ));
        }
        let qd = self.qd_calculator.calculate(storage.neq_kg)?;
        let zones = self.zone_builder.build_from_distances(*storage, &qd);

        info!(
            x = storage.x,
            y = storage.y,
            neq_kg = storage.neq_kg,
            crs = %storage.crs,
            sensitive_m = qd.sensitive_m,
            residential_m = qd.residential_m,
            road_m = qd.road_m,
            "Safety zones prepared"
        );

        Ok(PreparedAnalysis {
            storage: *storage,
            qd,
            zones,
        })
    }

    /// Resolve fetched features against the prepared zones
    pub fn resolve(
        &self,
        prepared: PreparedAnalysis,
        buildings: &[CandidateFeature],
        roads: &[CandidateFeature],
    ) -> AnalysisResult {
        let resolver = match &self.type_names {
            Some(registry) => ExposureResolver::with_type_names(registry),
            None => ExposureResolver::new(),
        };
        let neq_kg = prepared.storage.neq_kg;

        let (valid_buildings, mut anomalies) = resolver.screen(prepared.storage.crs, buildings);
        let (valid_roads, road_anomalies) = resolver.screen(prepared.storage.crs, roads);
        anomalies.extend(road_anomalies);

        let exposures: Vec<(ZoneKind, Vec<ExposedObject>)> = prepared
            .zones
            .iter()
            .map(|zone| {
                let mut objects = resolver.admit(zone, neq_kg, &valid_buildings);
                if zone.kind == ZoneKind::Road {
                    objects.extend(resolver.admit(zone, neq_kg, &valid_roads));
                }
                (zone.kind, objects)
            })
            .collect();

        let result = AnalysisResult {
            analysis_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().naive_utc(),
            storage: prepared.storage,
            qd: prepared.qd,
            zones: prepared.zones,
            exposures,
            anomalies,
        };

        info!(
            analysis_id = %result.analysis_id,
            exposed = result.merged_rows().len(),
            anomalies = result.anomalies.len(),
            "Exposure analysis completed"
        );

        result
    }

    /// One-shot analysis over already fetched features
    pub fn analyze(
        &self,
        storage: &StoragePoint,
        buildings: &[CandidateFeature],
        roads: &[CandidateFeature],
    ) -> EngineResult<AnalysisResult> {
        let prepared = self.prepare(storage)?;
        Ok(self.resolve(prepared, buildings, roads))
    }
}
