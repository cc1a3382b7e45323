//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use geofence::api::{BoundaryInfo, VerificationData};
use geofence::output::{BoundaryReport, OutputMode, VerifyReport};

use crate::common::{polygon_verifier, radius_verifier};

fn rejected() -> VerifyReport {
    VerifyReport {
        latitude: 26.9,
        longitude: 75.7,
        verification: VerificationData {
            gps_verified: false,
            reason: "Location outside campus boundary: 8711.8m from center".to_string(),
            distance: Some(8711.79),
            accuracy: Some(15.0),
            campus: None,
            distance_to_boundary: Some(8583.2),
        },
    }
}

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn verify_report_json_is_flat() {
    let json = serde_json::to_value(rejected()).unwrap();
    assert_eq!(json["latitude"], 26.9);
    assert_eq!(json["gps_verified"], false);
    assert_eq!(json["distance_to_boundary"], 8583.2);
    assert!(json.get("verification").is_none());
}

#[test]
fn verify_report_human_rejected() {
    let text = rejected().to_human();
    assert!(text.contains("REJECTED"));
    assert!(text.contains("8711.8m from center"));
    assert!(text.contains("Boundary:  8583.2m away"));
    assert!(text.contains("Accuracy:  15m"));
    assert!(!text.contains("Campus:"));
}

#[test]
fn verify_report_human_verified() {
    let report = VerifyReport {
        latitude: 26.8351,
        longitude: 75.6508,
        verification: VerificationData {
            gps_verified: true,
            reason: "Location verified within campus boundary".to_string(),
            distance: Some(0.0),
            accuracy: None,
            campus: Some("JKLU Campus".to_string()),
            distance_to_boundary: None,
        },
    };
    let text = report.to_human();
    assert!(text.contains("VERIFIED"));
    assert!(text.contains("(26.835100, 75.650800)"));
    assert!(text.contains("Campus:    JKLU Campus"));
    assert!(!text.contains("Accuracy"));
}

#[test]
fn boundary_report_polygon() {
    let report = BoundaryReport {
        source: "built-in defaults".to_string(),
        boundary: BoundaryInfo::from(&polygon_verifier()),
    };
    let text = report.to_human();
    assert!(text.contains("built-in defaults"));
    assert!(text.contains("polygon, 4 vertices"));
    assert!(text.contains("Max accuracy:  500m"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["source"], "built-in defaults");
    assert_eq!(json["polygon"].as_array().unwrap().len(), 4);
}

#[test]
fn boundary_report_radius() {
    let report = BoundaryReport {
        source: "campus.toml".to_string(),
        boundary: BoundaryInfo::from(&radius_verifier()),
    };
    let text = report.to_human();
    assert!(text.contains("radius, 800.0m"));
    assert!(!text.contains("Bounds"));
}
