//! Tests for configuration loading

use std::collections::HashMap;
use std::fs;

use geofence::config::{AppConfig, ConfigError};
use geofence::core::models::{BoundaryError, Coordinate};
use serial_test::serial;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_default_is_jklu_polygon() {
    let config = AppConfig::default();
    assert_eq!(config.campus.name, "JKLU Campus");
    assert_eq!(config.campus.polygon.as_ref().unwrap().len(), 14);
    assert_eq!(config.campus.radius_m, Some(800.0));
    assert!((config.gps.max_accuracy_m - 500.0).abs() < f64::EPSILON);
    assert_eq!(config.server.addr(), "0.0.0.0:5000");
    assert_eq!(config.server.workers, 4);
}

#[test]
fn test_default_verifier_accepts_campus_center() {
    let verifier = AppConfig::default().verifier().unwrap();
    let result = verifier.verify_location(Coordinate::new(26.8351, 75.6508), Some(15.0));
    assert!(result.is_verified(), "{}", result.reason());
    assert_eq!(result.campus(), Some("JKLU Campus"));
}

// =============================================================================
// TOML
// =============================================================================

#[test]
fn test_empty_toml_uses_defaults() {
    let config = AppConfig::from_toml_str("").unwrap();
    assert_eq!(config.campus.name, "JKLU Campus");
    assert_eq!(config.server.port, 5000);
}

#[test]
fn test_campus_section_describes_campus_fully() {
    let config = AppConfig::from_toml_str(
        r#"
        [campus]
        latitude = 12.5
        longitude = 77.25
        radius_m = 300.0
        "#,
    )
    .unwrap();
    assert_eq!(config.campus.name, "Campus");
    assert_eq!(config.campus.polygon, None);

    let boundary = config.boundary().unwrap();
    assert_eq!(boundary.polygon(), None);
    assert_eq!(boundary.radius_m(), Some(300.0));
}

#[test]
fn test_polygon_from_toml() {
    let config = AppConfig::from_toml_str(
        r#"
        [campus]
        name = "North"
        latitude = 26.8355
        longitude = 75.65
        polygon = [[26.8360, 75.6510], [26.8370, 75.6500], [26.8350, 75.6490], [26.8340, 75.6505]]

        [gps]
        max_accuracy_m = 200.0

        [server]
        port = 8080
        "#,
    )
    .unwrap();
    let verifier = config.verifier().unwrap();
    assert_eq!(verifier.boundary().polygon().unwrap().len(), 4);
    assert!((verifier.max_accuracy_m() - 200.0).abs() < f64::EPSILON);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_missing_center_is_parse_error() {
    let err = AppConfig::from_toml_str("[campus]\nname = \"x\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_two_vertex_polygon_is_rejected() {
    let config = AppConfig::from_toml_str(
        "[campus]\nlatitude = 1.0\nlongitude = 1.0\npolygon = [[0.0, 0.0], [1.0, 1.0]]\n",
    )
    .unwrap();
    let err = config.verifier().unwrap_err();
    assert!(matches!(err, ConfigError::Boundary(BoundaryError::TooFewVertices(2))));
}

#[test]
fn test_no_polygon_and_no_radius_is_rejected() {
    let config = AppConfig::from_toml_str("[campus]\nlatitude = 1.0\nlongitude = 1.0\n").unwrap();
    assert!(matches!(
        config.boundary().unwrap_err(),
        ConfigError::Boundary(BoundaryError::NoContainmentRule)
    ));
}

#[test]
fn test_negative_accuracy_threshold_is_rejected() {
    let config = AppConfig::from_toml_str("[gps]\nmax_accuracy_m = -5.0\n").unwrap();
    let err = config.verifier().unwrap_err();
    assert!(err.to_string().contains("gps.max_accuracy_m"));
}

#[test]
fn test_nan_accuracy_threshold_is_rejected() {
    let config = AppConfig::from_toml_str("[gps]\nmax_accuracy_m = nan\n").unwrap();
    assert!(matches!(
        config.verifier().unwrap_err(),
        ConfigError::InvalidValue { field: "gps.max_accuracy_m", .. }
    ));
}

// =============================================================================
// FILES
// =============================================================================

#[test]
fn test_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("geofence.toml");
    fs::write(&path, "[gps]\nmax_accuracy_m = 100.0\n").unwrap();

    let config = AppConfig::from_file(&path).unwrap();
    assert!((config.gps.max_accuracy_m - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_from_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");
    assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::NotFound(_))));
}

#[test]
fn test_parse_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[gps\n").unwrap();

    let err = AppConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}

// =============================================================================
// ENVIRONMENT OVERRIDES
// =============================================================================

#[test]
fn test_env_overrides_center_and_threshold() {
    let mut config = AppConfig::default();
    config
        .apply_env_with(env(&[
            ("CAMPUS_LATITUDE", "12.0"),
            ("CAMPUS_LONGITUDE", " 77.5 "),
            ("GPS_MAX_ACCURACY", "200"),
            ("GEOFENCE_PORT", "9000"),
            ("CAMPUS_NAME", "Elsewhere"),
        ]))
        .unwrap();
    assert!((config.campus.latitude - 12.0).abs() < f64::EPSILON);
    assert!((config.campus.longitude - 77.5).abs() < f64::EPSILON);
    assert!((config.gps.max_accuracy_m - 200.0).abs() < f64::EPSILON);
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.campus.name, "Elsewhere");
}

#[test]
fn test_env_polygon_json() {
    let mut config = AppConfig::default();
    config
        .apply_env_with(env(&[("CAMPUS_POLYGON", "[[1.0, 2.0], [1.0, 3.0], [2.0, 3.0]]")]))
        .unwrap();
    assert_eq!(config.campus.polygon, Some(vec![[1.0, 2.0], [1.0, 3.0], [2.0, 3.0]]));
}

#[test]
fn test_env_empty_polygon_selects_radius_mode() {
    let mut config = AppConfig::default();
    config.apply_env_with(env(&[("CAMPUS_POLYGON", "")])).unwrap();
    let boundary = config.boundary().unwrap();
    assert_eq!(boundary.polygon(), None);
    assert_eq!(boundary.radius_m(), Some(800.0));
}

#[test]
fn test_env_clearing_both_rules_fails_at_build() {
    let mut config = AppConfig::default();
    config
        .apply_env_with(env(&[("CAMPUS_POLYGON", " "), ("CAMPUS_RADIUS", "")]))
        .unwrap();
    assert!(config.boundary().is_err());
}

#[test]
fn test_env_invalid_number_names_variable() {
    let mut config = AppConfig::default();
    let err = config.apply_env_with(env(&[("CAMPUS_LATITUDE", "north")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { var: "CAMPUS_LATITUDE", .. }));
    assert!(err.to_string().contains("CAMPUS_LATITUDE"));
}

#[test]
fn test_env_invalid_polygon() {
    let mut config = AppConfig::default();
    let err = config.apply_env_with(env(&[("CAMPUS_POLYGON", "[[1.0]]")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { var: "CAMPUS_POLYGON", .. }));
}

#[test]
#[serial]
fn test_load_applies_process_env() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("campus.toml");
    fs::write(&path, "[gps]\nmax_accuracy_m = 100.0\n").unwrap();

    // SAFETY: serialized with other env-mutating tests
    unsafe { std::env::set_var("GPS_MAX_ACCURACY", "250") };
    let config = AppConfig::load(Some(&path));
    unsafe { std::env::remove_var("GPS_MAX_ACCURACY") };

    assert!((config.unwrap().gps.max_accuracy_m - 250.0).abs() < f64::EPSILON);
}
