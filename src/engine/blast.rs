// ==========================================
// Tangos - overpressure model
// ==========================================
// Basis: Kingery & Bulmash polynomials as simplified by Swisdak (1994)
// ==========================================
// Input: distance (m), NEQ (kg TNT equivalent)
// Output: peak incident overpressure (kPa)
// Note: the fit is discontinuous at Z = 2.9 and Z = 23.8 by construction
// ==========================================

use crate::engine::error::{AnalysisError, EngineResult};

/// Upper scaled-distance limit of the near regime (inclusive)
pub const NEAR_REGIME_MAX_Z: f64 = 2.9;
/// Upper scaled-distance limit of the middle regime (inclusive)
pub const MID_REGIME_MAX_Z: f64 = 23.8;

/// Polynomial coefficients of ln(P) in ln(Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRegime {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

pub const NEAR_REGIME: PressureRegime = PressureRegime {
    a: 7.2106,
    b: -2.1069,
    c: -0.3229,
    d: 0.1117,
    e: 0.0685,
};

pub const MID_REGIME: PressureRegime = PressureRegime {
    a: 7.5938,
    b: -3.0523,
    c: 0.40977,
    d: 0.0261,
    e: -0.01267,
};

pub const FAR_REGIME: PressureRegime = PressureRegime {
    a: 6.0536,
    b: -1.4066,
    c: 0.0,
    d: 0.0,
    e: 0.0,
};

impl PressureRegime {
    /// Regime for a scaled distance
    pub fn for_scaled_distance(z: f64) -> &'static PressureRegime {
        if z <= NEAR_REGIME_MAX_Z {
            &NEAR_REGIME
        } else if z <= MID_REGIME_MAX_Z {
            &MID_REGIME
        } else {
            &FAR_REGIME
        }
    }

    /// exp(A + B·ln Z + C·ln²Z + D·ln³Z + E·ln⁴Z), Z must be > 0
    pub fn evaluate(&self, z: f64) -> f64 {
        let l = z.ln();
        let exponent = self.a + l * (self.b + l * (self.c + l * (self.d + l * self.e)));
        exponent.exp()
    }
}

/// Scaled distance Z = distance / NEQ^(1/3)
pub fn scaled_distance(distance_m: f64, neq_kg: f64) -> f64 {
    distance_m / neq_kg.cbrt()
}

/// Peak incident overpressure in kPa
///
/// # Errors
/// `NotComputable` unless distance and NEQ are both finite and > 0.
/// Callers store this as a missing value, never as zero.
pub fn overpressure(distance_m: f64, neq_kg: f64) -> EngineResult<f64> {
    let valid = distance_m.is_finite() && distance_m > 0.0 && neq_kg.is_finite() && neq_kg > 0.0;
    if !valid {
        return Err(AnalysisError::NotComputable { distance_m, neq_kg });
    }

    let z = scaled_distance(distance_m, neq_kg);
    Ok(PressureRegime::for_scaled_distance(z).evaluate(z))
}

/// `overpressure` with the error folded into `None`
pub fn overpressure_opt(distance_m: f64, neq_kg: f64) -> Option<f64> {
    overpressure(distance_m, neq_kg).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < 1e-9, "actual={actual}, expected={expected}, rel={rel}");
    }

    #[test]
    fn test_reference_value_mid_regime() {
        // Z = 100 / 1000^(1/3) = 10
        assert_close(overpressure(100.0, 1000.0).unwrap(), 14.889461953034726);
    }

    #[test]
    fn test_regime_boundaries_are_inclusive() {
        // Z = 2.9 exactly still uses the near regime
        assert_close(overpressure(29.0, 1000.0).unwrap(), 124.48234786789612);
        // Z = 23.8 exactly still uses the middle regime
        assert_close(overpressure(238.0, 1000.0).unwrap(), 4.8946564631437655);
    }

    #[test]
    fn test_discontinuity_is_preserved() {
        let near = NEAR_REGIME.evaluate(2.9);
        let mid = MID_REGIME.evaluate(2.9);
        assert_close(near, 124.48234786789612);
        assert_close(mid, 124.42739008705455);
        assert!(near != mid);

        let mid = MID_REGIME.evaluate(23.8);
        let far = FAR_REGIME.evaluate(23.8);
        assert_close(far, 4.9289217995505785);
        assert!(far > mid);

        // Just past the boundary the far regime takes over
        let just_past = overpressure(238.0 + 1e-6, 1000.0).unwrap();
        assert!((just_past - far).abs() < 1e-6);
    }

    #[test]
    fn test_other_regimes() {
        assert_close(overpressure(5.0, 1000.0).unwrap(), 4887.649867024541);
        assert_close(overpressure(10.0, 1000.0).unwrap(), 1353.7042463040013);
        assert_close(overpressure(500.0, 1000.0).unwrap(), 1.734897685149846);
    }

    #[test]
    fn test_decreasing_within_regimes() {
        let mut previous = f64::INFINITY;
        for d in [3.0, 10.0, 25.0, 50.0, 100.0, 200.0, 400.0, 800.0] {
            let p = overpressure(d, 1000.0).unwrap();
            assert!(p < previous);
            assert!(p > 0.0);
            previous = p;
        }
    }

    #[test]
    fn test_not_computable() {
        for (d, q) in [(0.0, 1000.0), (-1.0, 1000.0), (100.0, 0.0), (100.0, -1.0), (f64::NAN, 1.0)] {
            assert!(matches!(
                overpressure(d, q),
                Err(AnalysisError::NotComputable { .. })
            ));
            assert_eq!(overpressure_opt(d, q), None);
        }
    }
}
