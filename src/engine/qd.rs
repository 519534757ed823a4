// ==========================================
// Tangos - QD calculator
// ==========================================
// Basis: Eksplosivforskriften § 37
// ==========================================
// Input: NEQ (kg TNT equivalent)
// Output: QD distances for sensitive objects, dwellings and roads
// Rule: d = max(round(k * NEQ^(1/3)), floor)
// ==========================================

use crate::domain::types::ZoneKind;
use crate::domain::zone::QdDistances;
use crate::engine::error::{AnalysisError, EngineResult};
use tracing::debug;

/// Regulatory coefficient and minimum distance for one zone kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QdRule {
    pub kind: ZoneKind,
    pub coefficient: f64,
    pub floor_m: u32,
}

/// Fixed regulatory constants
pub const QD_RULES: [QdRule; 3] = [
    QdRule {
        kind: ZoneKind::Sensitive,
        coefficient: 44.4,
        floor_m: 800,
    },
    QdRule {
        kind: ZoneKind::Residential,
        coefficient: 22.2,
        floor_m: 400,
    },
    QdRule {
        kind: ZoneKind::Road,
        coefficient: 14.8,
        floor_m: 180,
    },
];

impl QdRule {
    /// Distance for a NEQ already known to be positive and finite
    fn distance(&self, cube_root: f64) -> u32 {
        let raw = round_distance(self.coefficient * cube_root);
        // raw is finite and positive here; the cast saturates on absurd inputs
        (raw as u32).max(self.floor_m)
    }
}

/// Nearest-integer rounding, ties to even
pub(crate) fn round_distance(value: f64) -> f64 {
    value.round_ties_even()
}

/// Compute the three QD distances
///
/// # Errors
/// `InvalidQuantity` when NEQ is not a positive finite number
pub fn qd(neq_kg: f64) -> EngineResult<QdDistances> {
    if !neq_kg.is_finite() {
        return Err(AnalysisError::invalid_quantity(neq_kg, "not a finite number"));
    }
    if neq_kg <= 0.0 {
        return Err(AnalysisError::invalid_quantity(neq_kg, "must be greater than zero"));
    }

    let cube_root = neq_kg.cbrt();
    let distances = QdDistances {
        sensitive_m: QD_RULES[0].distance(cube_root),
        residential_m: QD_RULES[1].distance(cube_root),
        road_m: QD_RULES[2].distance(cube_root),
    };

    debug!(
        neq_kg,
        sensitive_m = distances.sensitive_m,
        residential_m = distances.residential_m,
        road_m = distances.road_m,
        "QD distances computed"
    );

    Ok(distances)
}

// ==========================================
// QdCalculator - QD with operational bounds
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct QdCalculator {
    min_neq_kg: f64,
    max_neq_kg: f64,
}

impl QdCalculator {
    /// # Arguments
    /// - `min_neq_kg`: smallest accepted NEQ (inclusive)
    /// - `max_neq_kg`: largest accepted NEQ (inclusive)
    pub fn new(min_neq_kg: f64, max_neq_kg: f64) -> Self {
        Self {
            min_neq_kg,
            max_neq_kg,
        }
    }

    /// Check NEQ against both the mathematical and the operational bounds
    pub fn validate(&self, neq_kg: f64) -> EngineResult<()> {
        if !neq_kg.is_finite() || neq_kg <= 0.0 {
            return Err(AnalysisError::invalid_quantity(
                neq_kg,
                "must be a finite number greater than zero",
            ));
        }
        if neq_kg < self.min_neq_kg || neq_kg > self.max_neq_kg {
            return Err(AnalysisError::invalid_quantity(
                neq_kg,
                format!(
                    "outside operational range [{}, {}] kg",
                    self.min_neq_kg, self.max_neq_kg
                ),
            ));
        }
        Ok(())
    }

    pub fn calculate(&self, neq_kg: f64) -> EngineResult<QdDistances> {
        self.validate(neq_kg)?;
        qd(neq_kg)
    }
}

impl Default for QdCalculator {
    fn default() -> Self {
        Self::new(1.0, 100_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floors_dominate_small_quantities() {
        let d = qd(1000.0).unwrap();
        assert_eq!(d.sensitive_m, 800);
        assert_eq!(d.residential_m, 400);
        assert_eq!(d.road_m, 180);

        let d = qd(1.0).unwrap();
        assert_eq!((d.sensitive_m, d.residential_m, d.road_m), (800, 400, 180));
    }

    #[test]
    fn test_above_floor() {
        // 8000^(1/3) = 20
        let d = qd(8000.0).unwrap();
        assert_eq!((d.sensitive_m, d.residential_m, d.road_m), (888, 444, 296));

        // 12920^(1/3) = 23.465...
        let d = qd(12920.0).unwrap();
        assert_eq!((d.sensitive_m, d.residential_m, d.road_m), (1042, 521, 347));

        let d = qd(100_000.0).unwrap();
        assert_eq!((d.sensitive_m, d.residential_m, d.road_m), (2061, 1030, 687));
    }

    #[test]
    fn test_rounding_ties_to_even() {
        assert_eq!(round_distance(800.5), 800.0);
        assert_eq!(round_distance(801.5), 802.0);
        assert_eq!(round_distance(444.49), 444.0);
        assert_eq!(round_distance(444.51), 445.0);
    }

    #[test]
    fn test_invalid_quantity() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = qd(bad).unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidQuantity { .. }));
        }
    }

    #[test]
    fn test_monotonic_above_floor_crossing() {
        let mut previous = qd(6000.0).unwrap();
        for neq in (6500..=100_000).step_by(500) {
            let current = qd(neq as f64).unwrap();
            assert!(current.sensitive_m >= previous.sensitive_m);
            assert!(current.residential_m >= previous.residential_m);
            assert!(current.road_m >= previous.road_m);
            assert!(current.sensitive_m >= 800);
            assert!(current.residential_m >= 400);
            assert!(current.road_m >= 180);
            previous = current;
        }
    }

    #[test]
    fn test_calculator_operational_bounds() {
        let calc = QdCalculator::default();
        assert!(calc.calculate(100_000.0).is_ok());
        assert!(matches!(
            calc.calculate(100_001.0),
            Err(AnalysisError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            calc.calculate(0.5),
            Err(AnalysisError::InvalidQuantity { .. })
        ));
    }
}
