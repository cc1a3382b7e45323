//! Geofence verifier - decides whether a GPS fix counts as on campus
//!
//! The verifier is a pure function of its inputs and the boundary it was
//! built with. It holds no mutable state and is safe to share across
//! threads behind an `Arc`.

use thiserror::Error;

use crate::core::models::{
    CampusBoundary, Coordinate, Rejection, VerificationResult, Verified, is_valid_accuracy,
};

use super::geometry::{distance_to_polygon_m, haversine_m, point_in_polygon};

/// Default largest accuracy radius (meters) a fix may report and still be trusted
pub const DEFAULT_MAX_ACCURACY_M: f64 = 500.0;

/// Errors building a verifier
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum VerifierError {
    /// The accuracy threshold is negative, infinite or NaN
    #[error("accuracy threshold must be a non-negative number of meters, got {0}")]
    InvalidMaxAccuracy(f64),
}

/// Checks reported locations against a fixed campus boundary
#[derive(Debug, Clone)]
pub struct GeofenceVerifier {
    boundary: CampusBoundary,
    max_accuracy_m: f64,
}

impl GeofenceVerifier {
    /// Create a verifier for `boundary` that rejects fixes less accurate than `max_accuracy_m`
    pub fn new(boundary: CampusBoundary, max_accuracy_m: f64) -> Result<Self, VerifierError> {
        if !is_valid_accuracy(max_accuracy_m) {
            return Err(VerifierError::InvalidMaxAccuracy(max_accuracy_m));
        }
        Ok(Self {
            boundary,
            max_accuracy_m,
        })
    }

    /// The boundary this verifier checks against
    #[must_use]
    pub const fn boundary(&self) -> &CampusBoundary {
        &self.boundary
    }

    /// Accuracy threshold in meters; readings above it are rejected
    #[must_use]
    pub const fn max_accuracy_m(&self) -> f64 {
        self.max_accuracy_m
    }

    /// Verify a reported location
    ///
    /// Checks run in a fixed order: coordinate validity, accuracy gate,
    /// distance from center, then containment. The polygon decides
    /// containment when configured; otherwise the radius does.
    #[must_use]
    pub fn verify_location(
        &self,
        coordinate: Coordinate,
        accuracy_m: Option<f64>,
    ) -> VerificationResult {
        if !coordinate.is_valid() || accuracy_m.is_some_and(|a| !is_valid_accuracy(a)) {
            log::debug!("Rejected {coordinate}: invalid input (accuracy {accuracy_m:?})");
            return VerificationResult::Rejected(Rejection::InvalidCoordinate {
                accuracy_m,
            });
        }

        if let Some(accuracy) = accuracy_m
            && accuracy > self.max_accuracy_m
        {
            log::debug!("Rejected {coordinate}: accuracy {accuracy}m over {}m", self.max_accuracy_m);
            return VerificationResult::Rejected(Rejection::AccuracyTooLow {
                accuracy_m: accuracy,
                max_accuracy_m: self.max_accuracy_m,
            });
        }

        let distance_m = haversine_m(coordinate, self.boundary.center());

        let (inside, radius_m) = match (self.boundary.polygon(), self.boundary.radius_m()) {
            (Some(polygon), _) => (point_in_polygon(coordinate, polygon), None),
            (None, Some(radius)) => (distance_m <= radius, Some(radius)),
            // CampusBoundary::new guarantees a polygon or a radius
            (None, None) => (false, None),
        };

        if inside {
            log::debug!("Verified {coordinate}: {distance_m:.1}m from center");
            return VerificationResult::Verified(Verified {
                distance_m,
                accuracy_m,
                campus: self.boundary.name().to_string(),
            });
        }

        let distance_to_boundary_m = self
            .boundary
            .polygon()
            .and_then(|polygon| distance_to_polygon_m(coordinate, polygon));

        log::debug!("Rejected {coordinate}: outside, {distance_m:.1}m from center");
        VerificationResult::Rejected(Rejection::OutsideBoundary {
            distance_m,
            accuracy_m,
            radius_m,
            distance_to_boundary_m,
        })
    }
}
