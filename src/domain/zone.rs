// ==========================================
// Tangos - safety zones
// ==========================================
// A safety zone is a disk around the storage point whose radius is a QD
// distance. Zones are built once per analysis and never mutated.
// ==========================================

use crate::domain::types::{Crs, ZoneKind};
use geo::{Contains, Coord, Intersects, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

// ==========================================
// BoundingBox - axis-aligned query rectangle
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a disk
    pub fn around(center: Point<f64>, radius: f64) -> Self {
        Self {
            min_x: center.x() - radius,
            min_y: center.y() - radius,
            max_x: center.x() + radius,
            max_y: center.y() + radius,
        }
    }

    /// Bounding box of a set of coordinates, `None` when empty
    pub fn of_coords<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for c in iter {
            bbox.min_x = bbox.min_x.min(c.x);
            bbox.min_y = bbox.min_y.min(c.y);
            bbox.max_x = bbox.max_x.max(c.x);
            bbox.max_y = bbox.max_y.max(c.y);
        }
        Some(bbox)
    }

    /// Closed containment (edges count as inside)
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// `minx,miny,maxx,maxy` as used in registry bbox query parameters
    pub fn to_query_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

// ==========================================
// SafetyZone
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyZone {
    pub kind: ZoneKind,
    pub crs: Crs,
    pub center: Point<f64>,
    pub radius_m: f64,
    pub polygon: Polygon<f64>,
    pub bbox: BoundingBox,
}

impl SafetyZone {
    /// Strict interior test, points on the disk boundary are outside
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        self.bbox.contains_xy(point.x(), point.y()) && self.polygon.contains(point)
    }

    /// Any shared point, including a touch on the boundary
    pub fn intersects_line(&self, line: &LineString<f64>) -> bool {
        match BoundingBox::of_coords(line.coords()) {
            Some(line_bbox) => self.bbox.overlaps(&line_bbox) && self.polygon.intersects(line),
            None => false,
        }
    }

    /// Number of vertices approximating the circle
    pub fn segment_count(&self) -> usize {
        self.polygon.exterior().0.len().saturating_sub(1)
    }
}

// ==========================================
// QdDistances - the three QD radii (meters)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QdDistances {
    pub sensitive_m: u32,
    pub residential_m: u32,
    pub road_m: u32,
}

impl QdDistances {
    pub fn radius(&self, kind: ZoneKind) -> u32 {
        match kind {
            ZoneKind::Sensitive => self.sensitive_m,
            ZoneKind::Residential => self.residential_m,
            ZoneKind::Road => self.road_m,
        }
    }
}
