// ==========================================
// Tangos - exposure resolver
// ==========================================
// Input: one safety zone + candidate features (bbox-restricted superset)
// Output: exposed objects with distance and overpressure, plus anomalies
// ==========================================
// Predicates:
// - point features: strictly within the disk (boundary excluded)
// - line features: intersect the disk (boundary touch included)
// A malformed feature is skipped and recorded; it never aborts the batch.
// ==========================================

use crate::domain::exposure::{ExposedObject, FeatureAnomaly, ObjectCategory, ZoneExposure};
use crate::domain::feature::{CandidateFeature, FeatureAttributes, FeatureGeometry};
use crate::domain::types::{Crs, FeatureKind};
use crate::domain::zone::SafetyZone;
use crate::engine::blast;
use crate::engine::classification;
use crate::source::building_types::BuildingTypeRegistry;
use geo::{Closest, ClosestPoint, EuclideanDistance, Point};
use std::collections::HashMap;
use tracing::{info, warn};

// ==========================================
// ExposureResolver
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ExposureResolver<'a> {
    type_names: Option<&'a BuildingTypeRegistry>,
}

impl<'a> ExposureResolver<'a> {
    pub fn new() -> Self {
        Self { type_names: None }
    }

    /// Attach a building type registry used to name exposed buildings
    pub fn with_type_names(type_names: &'a BuildingTypeRegistry) -> Self {
        Self {
            type_names: Some(type_names),
        }
    }

    /// Split candidates into evaluable features and anomalies
    ///
    /// Run once per batch; each bad feature yields exactly one anomaly no
    /// matter how many zones it is later tested against.
    pub fn screen<'c>(
        &self,
        crs: Crs,
        candidates: &'c [CandidateFeature],
    ) -> (Vec<&'c CandidateFeature>, Vec<FeatureAnomaly>) {
        let mut valid = Vec::with_capacity(candidates.len());
        let mut anomalies = Vec::new();

        for feature in candidates {
            match check_feature(crs, feature) {
                Ok(()) => valid.push(feature),
                Err(reason) => {
                    warn!(
                        feature_id = %feature.id,
                        kind = %feature.kind(),
                        %reason,
                        "Candidate feature skipped"
                    );
                    anomalies.push(FeatureAnomaly {
                        feature_id: feature.id.clone(),
                        kind: feature.kind(),
                        reason,
                    });
                }
            }
        }

        (valid, anomalies)
    }

    /// Exposed subset of already screened features for one zone
    ///
    /// One object per (kind, id); a repeated id keeps the closest version.
    pub fn admit(
        &self,
        zone: &SafetyZone,
        neq_kg: f64,
        features: &[&CandidateFeature],
    ) -> Vec<ExposedObject> {
        let mut objects: Vec<ExposedObject> = Vec::new();
        let mut by_key: HashMap<(FeatureKind, &str), usize> = HashMap::new();

        for feature in features.iter().copied() {
            if !is_exposed(zone, &feature.geometry) {
                continue;
            }

            let exposed = self.annotate(zone, neq_kg, feature);
            match by_key.get(&(feature.kind(), feature.id.as_str())) {
                Some(&i) => {
                    if exposed.distance_m < objects[i].distance_m {
                        objects[i] = exposed;
                    }
                }
                None => {
                    by_key.insert((feature.kind(), feature.id.as_str()), objects.len());
                    objects.push(exposed);
                }
            }
        }

        info!(
            zone = %zone.kind,
            radius_m = zone.radius_m,
            candidates = features.len(),
            exposed = objects.len(),
            "Zone resolved"
        );

        objects
    }

    /// Resolve the exposed subset of `candidates` for one zone
    ///
    /// # Arguments
    /// - `zone`: safety zone (disk + bbox)
    /// - `neq_kg`: NEQ of the storage, used for the overpressure
    /// - `candidates`: features in the zone's CRS, restricted to its bbox or a superset
    ///
    /// # Returns
    /// ZoneExposure with the admitted objects and every skipped feature
    pub fn resolve(
        &self,
        zone: &SafetyZone,
        neq_kg: f64,
        candidates: &[CandidateFeature],
    ) -> ZoneExposure {
        let (valid, anomalies) = self.screen(zone.crs, candidates);
        let objects = self.admit(zone, neq_kg, &valid);
        ZoneExposure { objects, anomalies }
    }

    /// Attach distance, overpressure and classification to an admitted feature
    fn annotate(
        &self,
        zone: &SafetyZone,
        neq_kg: f64,
        feature: &CandidateFeature,
    ) -> ExposedObject {
        let representative_point = representative_point(zone.center, &feature.geometry);
        let distance_m = zone.center.euclidean_distance(&representative_point);
        let overpressure_kpa = blast::overpressure_opt(distance_m, neq_kg);

        let (category, type_name) = match &feature.attributes {
            FeatureAttributes::Building { category_code } => (
                ObjectCategory::Building {
                    code: category_code.clone(),
                    category: classification::category_of(category_code),
                },
                self.type_names
                    .and_then(|r| r.name_for(category_code))
                    .map(str::to_string),
            ),
            FeatureAttributes::Road(traffic) => (ObjectCategory::Road(traffic.clone()), None),
        };

        ExposedObject {
            id: feature.id.clone(),
            kind: feature.kind(),
            name: feature.name.clone(),
            type_name,
            geometry: feature.geometry.clone(),
            representative_point,
            category,
            distance_m,
            overpressure_kpa,
        }
    }
}

/// Reason a feature cannot be evaluated, if any
fn check_feature(crs: Crs, feature: &CandidateFeature) -> Result<(), String> {
    if feature.id.trim().is_empty() {
        return Err("missing identifier".to_string());
    }
    if !crs.is_planar_compatible(feature.crs) {
        return Err(format!("CRS {} does not match analysis CRS {}", feature.crs, crs));
    }
    if !feature.geometry.is_well_formed() {
        return Err("malformed or non-finite geometry".to_string());
    }
    Ok(())
}

/// Containment predicate for a feature geometry
pub fn is_exposed(zone: &SafetyZone, geometry: &FeatureGeometry) -> bool {
    match geometry {
        FeatureGeometry::Point(p) => zone.contains_point(p),
        FeatureGeometry::Line(line) => zone.intersects_line(line),
    }
}

/// The point distances are measured to: the point itself, or the point of
/// a line closest to the storage
pub fn representative_point(center: Point<f64>, geometry: &FeatureGeometry) -> Point<f64> {
    match geometry {
        FeatureGeometry::Point(p) => *p,
        FeatureGeometry::Line(line) => match line.closest_point(&center) {
            Closest::Intersection(p) | Closest::SinglePoint(p) => p,
            Closest::Indeterminate => line.points().next().unwrap_or(center),
        },
    }
}
