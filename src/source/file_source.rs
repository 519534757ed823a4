// ==========================================
// Tangos - file backed feature source
// ==========================================
// Buildings: CSV  id,name,category_code,x,y
// Roads:     JSON [{ "id", "coordinates": [[x, y], ...], "aadt_year",
//                    "aadt_total", "aadt_basis", "speed_limit_kmh" }]
// ==========================================

use crate::domain::feature::{CandidateFeature, FeatureAttributes, FeatureGeometry, RoadTraffic};
use crate::domain::types::Crs;
use crate::domain::zone::BoundingBox;
use crate::source::error::{SourceError, SourceResult};
use crate::source::feature_source::{within_bbox, FeatureSource};
use async_trait::async_trait;
use csv::ReaderBuilder;
use geo::{LineString, Point};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One row of the buildings CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category_code: String,
    /// Missing or unparseable coordinates become NaN and are reported as
    /// anomalies downstream instead of failing the whole file
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub y: Option<f64>,
}

impl BuildingRow {
    pub fn into_feature(self, crs: Crs) -> CandidateFeature {
        CandidateFeature {
            id: self.id,
            name: self.name.filter(|n| !n.trim().is_empty()),
            crs,
            geometry: FeatureGeometry::Point(Point::new(
                self.x.unwrap_or(f64::NAN),
                self.y.unwrap_or(f64::NAN),
            )),
            attributes: FeatureAttributes::Building {
                category_code: self.category_code,
            },
        }
    }
}

/// One entry of the roads JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub coordinates: Vec<[f64; 2]>,
    #[serde(flatten)]
    pub traffic: RoadTraffic,
}

impl RoadRow {
    pub fn into_feature(self, crs: Crs) -> CandidateFeature {
        let coords: Vec<(f64, f64)> = self.coordinates.iter().map(|c| (c[0], c[1])).collect();
        CandidateFeature {
            id: self.id,
            name: self.name,
            crs,
            geometry: FeatureGeometry::Line(LineString::from(coords)),
            attributes: FeatureAttributes::Road(self.traffic),
        }
    }
}

// ==========================================
// FileFeatureSource
// ==========================================
#[derive(Debug, Clone)]
pub struct FileFeatureSource {
    buildings_path: Option<PathBuf>,
    roads_path: Option<PathBuf>,
    /// CRS the files are written in
    crs: Crs,
}

impl FileFeatureSource {
    pub fn new(buildings_path: Option<PathBuf>, roads_path: Option<PathBuf>, crs: Crs) -> Self {
        Self {
            buildings_path,
            roads_path,
            crs,
        }
    }

    pub fn read_buildings(path: &Path, crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut features = Vec::new();
        for row in reader.deserialize::<BuildingRow>() {
            features.push(row?.into_feature(crs));
        }
        Ok(features)
    }

    pub fn parse_roads(json: &[u8], crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        let rows: Vec<RoadRow> = serde_json::from_slice(json)?;
        Ok(rows.into_iter().map(|r| r.into_feature(crs)).collect())
    }

    fn check_crs(&self, requested: Crs) -> SourceResult<()> {
        if self.crs.is_planar_compatible(requested) {
            Ok(())
        } else {
            Err(SourceError::Query(format!(
                "requested {} but files are in {}",
                requested, self.crs
            )))
        }
    }
}

#[async_trait]
impl FeatureSource for FileFeatureSource {
    async fn fetch_buildings(&self, bbox: &BoundingBox, crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        self.check_crs(crs)?;
        let Some(path) = self.buildings_path.clone() else {
            return Ok(Vec::new());
        };

        let source_crs = self.crs;
        let all = tokio::task::spawn_blocking(move || Self::read_buildings(&path, source_crs))
            .await
            .map_err(|e| SourceError::Query(format!("building reader task failed: {e}")))??;

        let selected: Vec<CandidateFeature> = all.into_iter().filter(|f| within_bbox(f, bbox)).collect();
        debug!(selected = selected.len(), bbox = %bbox.to_query_string(), "Buildings read from file");
        Ok(selected)
    }

    async fn fetch_roads(&self, bbox: &BoundingBox, crs: Crs) -> SourceResult<Vec<CandidateFeature>> {
        self.check_crs(crs)?;
        let Some(path) = &self.roads_path else {
            return Ok(Vec::new());
        };

        let bytes = tokio::fs::read(path).await?;
        let selected: Vec<CandidateFeature> = Self::parse_roads(&bytes, self.crs)?
            .into_iter()
            .filter(|f| within_bbox(f, bbox))
            .collect();
        debug!(selected = selected.len(), bbox = %bbox.to_query_string(), "Roads read from file");
        Ok(selected)
    }
}
