// ==========================================
// Tangos - zone geometry builder
// ==========================================
// Input: storage point + QD distances
// Output: three disks (polygon + bounding box), one per zone kind
// ==========================================
// The polygon is inscribed in the true circle. The vertex count is chosen so
// the sagitta r·(1 - cos(π/n)) stays under the configured chord tolerance.
// ==========================================

use crate::domain::storage::StoragePoint;
use crate::domain::types::ZoneKind;
use crate::domain::zone::{BoundingBox, QdDistances, SafetyZone};
use crate::engine::error::{AnalysisError, EngineResult};
use crate::engine::qd;
use geo::{Coord, LineString, Point, Polygon};
use std::f64::consts::PI;
use tracing::debug;

pub const DEFAULT_CHORD_TOLERANCE_M: f64 = 0.05;
pub const DEFAULT_MIN_SEGMENTS: usize = 64;
pub const DEFAULT_MAX_SEGMENTS: usize = 8192;

// ==========================================
// ZoneGeometryBuilder
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ZoneGeometryBuilder {
    chord_tolerance_m: f64,
    min_segments: usize,
    max_segments: usize,
}

impl ZoneGeometryBuilder {
    pub fn new(chord_tolerance_m: f64, min_segments: usize, max_segments: usize) -> Self {
        Self {
            chord_tolerance_m,
            min_segments: min_segments.max(3),
            max_segments: max_segments.max(min_segments.max(3)),
        }
    }

    /// Build all three zones for a storage point
    ///
    /// Each zone gets its own copy of the point; nothing is shared between zones.
    ///
    /// # Errors
    /// - `InvalidGeometry`: non-finite storage coordinates
    /// - `InvalidQuantity`: NEQ not positive/finite
    pub fn build_zones(&self, storage: &StoragePoint) -> EngineResult<Vec<SafetyZone>> {
        if !storage.has_finite_coordinates() {
            return Err(AnalysisError::invalid_geometry(
                "storage point",
                format!("non-finite coordinates ({}, {})", storage.x, storage.y),
            ));
        }
        let distances = qd::qd(storage.neq_kg)?;
        Ok(self.build_from_distances(*storage, &distances))
    }

    /// Build zones from already computed QD distances
    pub fn build_from_distances(&self, storage: StoragePoint, distances: &QdDistances) -> Vec<SafetyZone> {
        ZoneKind::ALL
            .iter()
            .map(|&kind| self.build_zone(storage, kind, f64::from(distances.radius(kind))))
            .collect()
    }

    /// Build a single disk zone
    pub fn build_zone(&self, storage: StoragePoint, kind: ZoneKind, radius_m: f64) -> SafetyZone {
        let center = storage.point();
        let segments = self.segments_for_radius(radius_m);
        let polygon = disk_polygon(center, radius_m, segments);

        debug!(
            zone = %kind,
            radius_m,
            segments,
            crs = %storage.crs,
            "Zone geometry built"
        );

        SafetyZone {
            kind,
            crs: storage.crs,
            center,
            radius_m,
            polygon,
            bbox: BoundingBox::around(center, radius_m),
        }
    }

    /// Vertex count keeping the inscribed polygon within tolerance of the circle
    pub fn segments_for_radius(&self, radius_m: f64) -> usize {
        if radius_m <= self.chord_tolerance_m {
            return self.min_segments;
        }
        let half_angle = (1.0 - self.chord_tolerance_m / radius_m).acos();
        let needed = (PI / half_angle).ceil();
        if !needed.is_finite() {
            return self.max_segments;
        }
        (needed as usize).clamp(self.min_segments, self.max_segments)
    }
}

impl Default for ZoneGeometryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CHORD_TOLERANCE_M, DEFAULT_MIN_SEGMENTS, DEFAULT_MAX_SEGMENTS)
    }
}

/// Closed polygon with `segments` vertices on the circle, starting at angle 0
pub fn disk_polygon(center: Point<f64>, radius_m: f64, segments: usize) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = (0..segments)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / (segments as f64);
            Coord {
                x: center.x() + radius_m * angle.cos(),
                y: center.y() + radius_m * angle.sin(),
            }
        })
        .collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    Polygon::new(LineString::new(ring), vec![])
}
