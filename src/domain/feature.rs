// ==========================================
// Tangos - candidate features
// ==========================================
// Raw buildings and road segments handed over by the data-access layer,
// already restricted to (a superset of) a zone's bounding box
// ==========================================

use crate::domain::types::{Crs, FeatureKind};
use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

/// Geometry of a candidate feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "geometry", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureGeometry {
    Point(Point<f64>),
    Line(LineString<f64>),
}

impl FeatureGeometry {
    /// All coordinates are finite and a line has at least two vertices
    pub fn is_well_formed(&self) -> bool {
        match self {
            FeatureGeometry::Point(p) => p.x().is_finite() && p.y().is_finite(),
            FeatureGeometry::Line(line) => {
                line.0.len() >= 2 && line.coords().all(|c| c.x.is_finite() && c.y.is_finite())
            }
        }
    }

    /// Well-known text, e.g. `POINT (x y)` or `LINESTRING (x y, x y)`
    pub fn to_wkt(&self) -> String {
        match self {
            FeatureGeometry::Point(p) => format!("POINT ({} {})", p.x(), p.y()),
            FeatureGeometry::Line(line) => {
                let coords: Vec<String> = line.coords().map(|c| format!("{} {}", c.x, c.y)).collect();
                format!("LINESTRING ({})", coords.join(", "))
            }
        }
    }
}

/// Traffic attributes of a road segment (annual average daily traffic, ÅDT)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadTraffic {
    #[serde(default)]
    pub aadt_year: Option<i32>,
    #[serde(default)]
    pub aadt_total: Option<u32>,
    #[serde(default)]
    pub aadt_basis: Option<String>,
    #[serde(default)]
    pub speed_limit_kmh: Option<u32>,
}

/// Classification attributes of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureAttributes {
    /// Building-use code from the cadastre (e.g. "111" detached house)
    Building { category_code: String },
    Road(RoadTraffic),
}

impl FeatureAttributes {
    pub fn kind(&self) -> FeatureKind {
        match self {
            FeatureAttributes::Building { .. } => FeatureKind::Building,
            FeatureAttributes::Road(_) => FeatureKind::Road,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeature {
    /// Stable registry identifier
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub crs: Crs,
    pub geometry: FeatureGeometry,
    pub attributes: FeatureAttributes,
}

impl CandidateFeature {
    pub fn building(id: impl Into<String>, category_code: impl Into<String>, crs: Crs, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            crs,
            geometry: FeatureGeometry::Point(Point::new(x, y)),
            attributes: FeatureAttributes::Building {
                category_code: category_code.into(),
            },
        }
    }

    pub fn road(id: impl Into<String>, crs: Crs, coords: Vec<(f64, f64)>, traffic: RoadTraffic) -> Self {
        Self {
            id: id.into(),
            name: None,
            crs,
            geometry: FeatureGeometry::Line(LineString::from(coords)),
            attributes: FeatureAttributes::Road(traffic),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn kind(&self) -> FeatureKind {
        self.attributes.kind()
    }
}
