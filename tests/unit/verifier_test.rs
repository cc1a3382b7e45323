//! Tests for the geofence verifier decision policy

use geofence::core::models::{
    CampusBoundary, Coordinate, INVALID_COORDINATES_REASON, Rejection, VERIFIED_REASON,
    VerificationResult,
};
use geofence::core::services::{GeofenceVerifier, VerifierError};

use crate::common::{CENTER, polygon_verifier, polygon_verifier_with, quad_polygon, radius_verifier};

// =============================================================================
// RADIUS MODE
// =============================================================================

#[test]
fn test_radius_center_is_verified() {
    let result = radius_verifier().verify_location(CENTER, None);
    assert!(result.is_verified());
    assert_eq!(result.reason(), VERIFIED_REASON);
    assert!(result.distance_m().unwrap() < 1e-6);
    assert_eq!(result.campus(), Some("Radius Campus"));
}

#[test]
fn test_radius_890m_north_is_rejected() {
    let result = radius_verifier().verify_location(Coordinate::new(26.8431, 75.6508), None);
    assert!(!result.is_verified());

    let distance = result.distance_m().unwrap();
    assert!((distance - 889.56).abs() < 0.1, "got {distance}");
    assert_eq!(
        result.reason(),
        "Location outside campus boundary: 889.6m from center (limit: 800.0m)"
    );
    assert_eq!(result.distance_to_boundary_m(), None);
}

#[test]
fn test_radius_just_inside_limit() {
    // ~778m north of center
    let result = radius_verifier().verify_location(Coordinate::new(26.8421, 75.6508), Some(5.0));
    assert!(result.is_verified());
    assert_eq!(result.accuracy_m(), Some(5.0));
}

// =============================================================================
// POLYGON MODE
// =============================================================================

#[test]
fn test_polygon_interior_is_verified() {
    let result = polygon_verifier().verify_location(Coordinate::new(26.8355, 75.6500), None);
    assert!(result.is_verified());
    assert!(result.distance_m().is_some());
}

#[test]
fn test_polygon_far_outside_is_rejected_with_distance() {
    let result = polygon_verifier().verify_location(Coordinate::new(26.9000, 75.7000), None);
    assert!(!result.is_verified());

    let distance = result.distance_m().unwrap();
    assert!(distance > 8000.0, "got {distance}");
    assert!(result.reason().starts_with("Location outside campus boundary: "));
    assert!(result.reason().ends_with("m from center"));
    assert!(result.distance_to_boundary_m().unwrap() > 7000.0);
}

#[test]
fn test_polygon_supersedes_radius() {
    // Well inside the 800m radius but outside the small quadrilateral
    let point = Coordinate::new(26.8380, 75.6508);
    let result = polygon_verifier().verify_location(point, None);
    assert!(result.distance_m().unwrap() < 800.0);
    assert!(!result.is_verified());
    assert!(matches!(
        result,
        VerificationResult::Rejected(Rejection::OutsideBoundary { radius_m: None, .. })
    ));
}

#[test]
fn test_polygon_winding_does_not_matter() {
    let mut reversed = quad_polygon();
    reversed.reverse();
    let clockwise = polygon_verifier();
    let counter_clockwise = polygon_verifier_with(reversed);

    for point in [
        Coordinate::new(26.8355, 75.6500),
        Coordinate::new(26.8362, 75.6502),
        Coordinate::new(26.8345, 75.6500),
        Coordinate::new(26.8380, 75.6508),
        Coordinate::new(26.8300, 75.6400),
    ] {
        assert_eq!(
            clockwise.verify_location(point, None).is_verified(),
            counter_clockwise.verify_location(point, None).is_verified(),
            "winding changed verdict for {point}"
        );
    }
}

#[test]
fn test_closed_polygon_behaves_like_open() {
    let mut closed = quad_polygon();
    closed.push(closed[0]);
    let open = polygon_verifier();
    let closed = polygon_verifier_with(closed);

    let point = Coordinate::new(26.8355, 75.6500);
    assert_eq!(open.verify_location(point, None), closed.verify_location(point, None));
}

#[test]
fn test_edge_point_is_deterministic() {
    let verifier = polygon_verifier();
    // Vertex and midpoint of the first edge
    for point in [Coordinate::new(26.8360, 75.6510), Coordinate::new(26.8365, 75.6505)] {
        let first = verifier.verify_location(point, None);
        for _ in 0..10 {
            assert_eq!(verifier.verify_location(point, None), first);
        }
    }
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

#[test]
fn test_invalid_latitude() {
    let result = polygon_verifier().verify_location(Coordinate::new(95.0, 75.65), Some(10.0));
    assert!(!result.is_verified());
    assert_eq!(result.reason(), INVALID_COORDINATES_REASON);
    assert_eq!(result.distance_m(), None);
    assert_eq!(result.accuracy_m(), Some(10.0));
}

#[test]
fn test_invalid_coordinate_checked_before_accuracy() {
    let result = radius_verifier().verify_location(Coordinate::new(0.0, 181.0), Some(10_000.0));
    assert_eq!(result.reason(), INVALID_COORDINATES_REASON);
}

#[test]
fn test_nan_coordinate_is_invalid() {
    let result = radius_verifier().verify_location(Coordinate::new(f64::NAN, 75.65), None);
    assert_eq!(result.reason(), INVALID_COORDINATES_REASON);
}

#[test]
fn test_negative_accuracy_is_invalid() {
    let result = radius_verifier().verify_location(CENTER, Some(-1.0));
    assert!(!result.is_verified());
    assert_eq!(result.reason(), INVALID_COORDINATES_REASON);
}

// =============================================================================
// ACCURACY GATE
// =============================================================================

#[test]
fn test_accuracy_600_over_500_threshold() {
    let result = radius_verifier().verify_location(CENTER, Some(600.0));
    assert!(!result.is_verified());
    assert!(result.reason().contains("accuracy"));
    assert!(result.reason().contains("600"));
    assert!(result.reason().contains("500"));
    assert_eq!(result.distance_m(), None);
}

#[test]
fn test_accuracy_equal_to_threshold_passes() {
    let result = radius_verifier().verify_location(CENTER, Some(500.0));
    assert!(result.is_verified());
}

#[test]
fn test_accuracy_one_over_threshold_fails_even_at_center() {
    let result = radius_verifier().verify_location(CENTER, Some(501.0));
    assert!(matches!(
        result,
        VerificationResult::Rejected(Rejection::AccuracyTooLow { .. })
    ));
}

#[test]
fn test_zero_accuracy_is_accepted() {
    assert!(radius_verifier().verify_location(CENTER, Some(0.0)).is_verified());
}

#[test]
fn test_custom_threshold() {
    let boundary = CampusBoundary::new("c", CENTER, Some(800.0), None).unwrap();
    let strict = GeofenceVerifier::new(boundary, 200.0).unwrap();
    assert!(strict.verify_location(CENTER, Some(200.0)).is_verified());
    assert!(!strict.verify_location(CENTER, Some(250.0)).is_verified());
    assert!((strict.max_accuracy_m() - 200.0).abs() < f64::EPSILON);
}

#[test]
fn test_threshold_must_be_non_negative_meters() {
    let boundary = || CampusBoundary::new("c", CENTER, Some(800.0), None).unwrap();

    assert!(matches!(
        GeofenceVerifier::new(boundary(), f64::NAN),
        Err(VerifierError::InvalidMaxAccuracy(_))
    ));
    assert_eq!(
        GeofenceVerifier::new(boundary(), -5.0).unwrap_err(),
        VerifierError::InvalidMaxAccuracy(-5.0)
    );
    assert!(GeofenceVerifier::new(boundary(), f64::INFINITY).is_err());

    let exact = GeofenceVerifier::new(boundary(), 0.0).unwrap();
    assert!(exact.verify_location(CENTER, Some(0.0)).is_verified());
    assert!(!exact.verify_location(CENTER, Some(1.0)).is_verified());
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_shared_across_threads() {
    let verifier = std::sync::Arc::new(polygon_verifier());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let verifier = std::sync::Arc::clone(&verifier);
            std::thread::spawn(move || {
                verifier.verify_location(Coordinate::new(26.8355, 75.6500), None).is_verified()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
