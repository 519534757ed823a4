// ==========================================
// QD and overpressure integration tests
// ==========================================
// Coverage: QD table values, operational bounds, regime boundaries,
// monotonic decay across the three zones
// ==========================================


use tangos::domain::ZoneKind;
use tangos::engine::{overpressure, qd, AnalysisError};
use test_helpers::assert_close;

// ==========================================
// QD distances
// ==========================================

#[test]
fn test_qd_reference_quantities() {
    let cases = [
        (1000.0, (800, 400, 180)),
        (8000.0, (888, 444, 296)),
        (12920.0, (1042, 521, 347)),
        (100000.0, (2061, 1030, 687)),
    ];

    for (neq, (sensitive, residential, road)) in cases {
        let d = qd(neq).unwrap();
        assert_eq!(d.sensitive_m, sensitive, "sensitive for {neq}");
        assert_eq!(d.residential_m, residential, "residential for {neq}");
        assert_eq!(d.road_m, road, "road for {neq}");
        assert_eq!(d.radius(ZoneKind::Residential), residential);
    }
}

#[test]
fn test_qd_zone_ordering_holds_over_range() {
    let mut neq = 1.0;
    while neq <= 100_000.0 {
        let d = qd(neq).unwrap();
        assert!(d.sensitive_m >= d.residential_m, "neq {neq}");
        assert!(d.residential_m >= d.road_m, "neq {neq}");
        neq *= 1.7;
    }
}

#[test]
fn test_qd_rejects_invalid_quantities() {
    for neq in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(qd(neq), Err(AnalysisError::InvalidQuantity { .. })), "neq {neq}");
    }
}

// ==========================================
// Overpressure
// ==========================================

#[test]
fn test_overpressure_reference_value() {
    assert_close(overpressure(100.0, 1000.0).unwrap(), 14.889461953034726, 1e-9);
}

#[test]
fn test_overpressure_regime_boundaries() {
    // Values on both sides of Z = 2.9 and Z = 23.8 (the table is not continuous)
    let near = overpressure(2.9, 1.0).unwrap();
    assert_close(near, 124.48234786789612, 1e-9);
    let just_above = overpressure(2.9 + 1e-9, 1.0).unwrap();
    assert_close(just_above, 124.42739008705455, 1e-6);

    let mid = overpressure(23.8, 1.0).unwrap();
    assert_close(mid, 4.8946564631437655, 1e-9);
    let far = overpressure(23.8 + 1e-9, 1.0).unwrap();
    assert_close(far, 4.9289217995505785, 1e-6);
}

#[test]
fn test_overpressure_decreases_across_zone_radii() {
    let d = qd(12920.0).unwrap();
    let at_road = overpressure(d.road_m as f64, 12920.0).unwrap();
    let at_residential = overpressure(d.residential_m as f64, 12920.0).unwrap();
    let at_sensitive = overpressure(d.sensitive_m as f64, 12920.0).unwrap();

    assert!(at_road > at_residential);
    assert!(at_residential > at_sensitive);
    assert!(at_sensitive > 0.0);
}

#[test]
fn test_overpressure_not_computable() {
    assert!(matches!(
        overpressure(0.0, 1000.0),
        Err(AnalysisError::NotComputable { .. })
    ));
    assert!(matches!(
        overpressure(100.0, 0.0),
        Err(AnalysisError::NotComputable { .. })
    ));
    assert!(matches!(
        overpressure(f64::NAN, 1000.0),
        Err(AnalysisError::NotComputable { .. })
    ));
}

#[test]
fn test_overpressure_next_to_large_charge() {
    let p = overpressure(1.0, 12920.0).unwrap();
    assert!(p > 1.0e6, "got {p}");
}
