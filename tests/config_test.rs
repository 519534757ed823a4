// ==========================================
// AnalysisConfig integration tests
// ==========================================
// Coverage: JSON loading, defaults for missing keys, validation,
// environment overrides
// ==========================================


use tangos::config::{AnalysisConfig, ConfigError};
use test_helpers::write_temp_file;

#[test]
fn test_load_partial_file_keeps_defaults() {
    let file = write_temp_file(
        r#"{ "chord_tolerance_m": 0.1, "export": { "user_name": "kari", "include_roads": true } }"#,
        ".json",
    )
    .unwrap();

    let config = AnalysisConfig::load(file.path()).unwrap();

    assert_eq!(config.chord_tolerance_m, 0.1);
    assert_eq!(config.min_segments, 64);
    assert_eq!(config.export.user_name, "kari");
    assert_eq!(config.export.classification, "NO");
    assert!(config.export.include_roads);
}

#[test]
fn test_load_rejects_inconsistent_bounds() {
    let file = write_temp_file(r#"{ "min_neq_kg": 500.0, "max_neq_kg": 10.0 }"#, ".json").unwrap();

    let err = AnalysisConfig::load(file.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "max_neq_kg"));
}

#[test]
fn test_load_reports_parse_errors() {
    let file = write_temp_file("{ not json", ".json").unwrap();
    assert!(matches!(
        AnalysisConfig::load(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let err = AnalysisConfig::load(std::path::Path::new("/nonexistent/tangos.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_validate_segment_bounds() {
    let config = AnalysisConfig {
        min_segments: 2,
        ..AnalysisConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(AnalysisConfig::default().validate().is_ok());
}

#[test]
fn test_storage_name_env_override() {
    std::env::set_var("TANGOS_STORAGE_NAME", "  Lager Sør ");
    let mut config = AnalysisConfig::default();
    let applied = config.apply_env_overrides();
    std::env::remove_var("TANGOS_STORAGE_NAME");

    applied.unwrap();
    assert_eq!(config.export.storage_name, "Lager Sør");
}
