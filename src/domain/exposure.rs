// ==========================================
// Tangos - exposure results
// ==========================================
// ExposedObject: a feature admitted into a zone, with distance and pressure
// AnalysisResult: immutable hand-off from the resolver to the exporters
// ==========================================

use crate::domain::feature::{FeatureGeometry, RoadTraffic};
use crate::domain::storage::StoragePoint;
use crate::domain::types::{BuildingCategory, FeatureKind, ZoneKind};
use crate::domain::zone::{QdDistances, SafetyZone};
use chrono::NaiveDateTime;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// ObjectCategory
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectCategory {
    Building {
        code: String,
        category: Option<BuildingCategory>,
    },
    Road(RoadTraffic),
}

impl ObjectCategory {
    /// Category code as shown in tables: building-use code or road AADT
    pub fn code(&self) -> String {
        match self {
            ObjectCategory::Building { code, .. } => code.clone(),
            ObjectCategory::Road(traffic) => traffic
                .aadt_total
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn building_category(&self) -> Option<BuildingCategory> {
        match self {
            ObjectCategory::Building { category, .. } => *category,
            ObjectCategory::Road(_) => None,
        }
    }
}

// ==========================================
// ExposedObject
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposedObject {
    pub id: String,
    pub kind: FeatureKind,
    /// Feature's own name, if the registry carries one
    pub name: Option<String>,
    /// Readable name of the building-use code
    pub type_name: Option<String>,
    pub geometry: FeatureGeometry,
    /// Point the distance was measured to (the closest vertex/segment point for lines)
    pub representative_point: Point<f64>,
    pub category: ObjectCategory,
    pub distance_m: f64,
    /// `None` when the overpressure is not computable (distance or NEQ invalid)
    pub overpressure_kpa: Option<f64>,
}

impl ExposedObject {
    /// Name used in exports: type name, then own name, then id
    pub fn display_name(&self) -> String {
        self.type_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

// ==========================================
// FeatureAnomaly - a skipped candidate feature
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAnomaly {
    pub feature_id: String,
    pub kind: FeatureKind,
    pub reason: String,
}

// ==========================================
// ZoneExposure - resolver output for one zone
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneExposure {
    pub objects: Vec<ExposedObject>,
    pub anomalies: Vec<FeatureAnomaly>,
}

impl ZoneExposure {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ==========================================
// ExposureRow - one object after merging zones
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureRow {
    pub object: ExposedObject,
    /// Zones the object was admitted into, in evaluation order
    pub zones: Vec<ZoneKind>,
}

// ==========================================
// ExportRecord - display projection for the AMRISK file
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub object_id: String,
    pub name: String,
    pub category_code: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl From<&ExposedObject> for ExportRecord {
    fn from(obj: &ExposedObject) -> Self {
        Self {
            object_id: obj.id.clone(),
            name: obj.display_name(),
            category_code: obj.category.code(),
            x: Some(obj.representative_point.x()),
            y: Some(obj.representative_point.y()),
        }
    }
}

// ==========================================
// AnalysisResult
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub created_at: NaiveDateTime,
    pub storage: StoragePoint,
    pub qd: QdDistances,
    pub zones: Vec<SafetyZone>,
    /// Exposed objects per zone, same order as `zones`
    pub exposures: Vec<(ZoneKind, Vec<ExposedObject>)>,
    /// Candidates skipped before zone evaluation, one entry per feature
    pub anomalies: Vec<FeatureAnomaly>,
}

impl AnalysisResult {
    pub fn zone(&self, kind: ZoneKind) -> Option<&SafetyZone> {
        self.zones.iter().find(|z| z.kind == kind)
    }

    pub fn exposure(&self, kind: ZoneKind) -> Option<&[ExposedObject]> {
        self.exposures
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, objects)| objects.as_slice())
    }

    /// No object was admitted into any zone (a valid outcome, not an error)
    pub fn is_empty(&self) -> bool {
        self.exposures.iter().all(|(_, objects)| objects.is_empty())
    }

    /// Objects merged across zones, one row per feature kind and id
    ///
    /// Building and road ids come from different registries, so the kind is
    /// part of the key. Order is first appearance (zones in evaluation order).
    /// When the same object shows up with different attributes, the
    /// smallest-distance version wins.
    pub fn merged_rows(&self) -> Vec<ExposureRow> {
        let mut rows: Vec<ExposureRow> = Vec::new();
        let mut index: HashMap<(FeatureKind, &str), usize> = HashMap::new();

        for (kind, objects) in &self.exposures {
            for obj in objects {
                match index.get(&(obj.kind, obj.id.as_str())) {
                    Some(&i) => {
                        let row = &mut rows[i];
                        if !row.zones.contains(kind) {
                            row.zones.push(*kind);
                        }
                        if obj.distance_m < row.object.distance_m {
                            row.object = obj.clone();
                        }
                    }
                    None => {
                        index.insert((obj.kind, obj.id.as_str()), rows.len());
                        rows.push(ExposureRow {
                            object: obj.clone(),
                            zones: vec![*kind],
                        });
                    }
                }
            }
        }

        rows
    }

    /// Merged buildings grouped by category; uncategorised codes are left out
    pub fn by_category(&self) -> BTreeMap<BuildingCategory, Vec<ExposedObject>> {
        let mut groups: BTreeMap<BuildingCategory, Vec<ExposedObject>> = BTreeMap::new();
        for row in self.merged_rows() {
            if let Some(category) = row.object.category.building_category() {
                groups.entry(category).or_default().push(row.object);
            }
        }
        groups
    }

    /// Deduplicated export records
    pub fn export_records(&self, include_roads: bool) -> Vec<ExportRecord> {
        self.merged_rows()
            .iter()
            .filter(|row| include_roads || row.object.kind == FeatureKind::Building)
            .map(|row| ExportRecord::from(&row.object))
            .collect()
    }
}
