// ==========================================
// Tangos - storage point
// ==========================================
// Location of the explosive storage plus its net explosive quantity (NEQ)
// ==========================================

use crate::domain::types::Crs;
use geo::Point;
use serde::{Deserialize, Serialize};

/// Explosive storage location
///
/// `x` is easting and `y` is northing in `crs`; `neq_kg` is kilograms of TNT
/// equivalent. Validation happens in the engine, not at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoragePoint {
    pub x: f64,
    pub y: f64,
    pub neq_kg: f64,
    #[serde(default)]
    pub crs: Crs,
}

impl StoragePoint {
    pub fn new(x: f64, y: f64, neq_kg: f64, crs: Crs) -> Self {
        Self { x, y, neq_kg, crs }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }

    pub fn has_finite_coordinates(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
