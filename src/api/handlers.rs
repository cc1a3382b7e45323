//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take the shared verifier plus typed input and return `Result<T, ApiError>`.

use crate::core::models::{Coordinate, Rejection, VerificationResult};
use crate::core::services::GeofenceVerifier;

use super::error::ApiError;
use super::types::{
    BoundariesData, BoundaryInfo, TestLocationData, VerificationData, VerifyLocationRequest,
};

/// Accuracy assumed by the self-test endpoint when the client sends none
pub const TEST_DEFAULT_ACCURACY_M: f64 = 10.0;

// =============================================================================
// BOUNDARIES
// =============================================================================

/// Get the loaded campus boundary
pub fn get_boundaries(verifier: &GeofenceVerifier) -> Result<BoundariesData, ApiError> {
    Ok(BoundariesData {
        boundaries: BoundaryInfo::from(verifier),
    })
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify a location and return the raw verdict
///
/// A rejected location is still a successful request; the verdict is in
/// `gps_verified`. Only missing or malformed fields are errors.
pub fn verify_location(
    verifier: &GeofenceVerifier,
    req: &VerifyLocationRequest,
) -> Result<VerificationData, ApiError> {
    let (coordinate, accuracy) = parse_location(req, None)?;
    let result = verifier.verify_location(coordinate, accuracy);
    Ok(VerificationData::from(&result))
}

/// Run a verification for diagnostics, assuming a good fix if no accuracy is sent
pub fn test_location(
    verifier: &GeofenceVerifier,
    req: &VerifyLocationRequest,
) -> Result<TestLocationData, ApiError> {
    let (coordinate, accuracy) = parse_location(req, Some(TEST_DEFAULT_ACCURACY_M))?;
    let result = verifier.verify_location(coordinate, accuracy);
    Ok(TestLocationData {
        test_result: VerificationData::from(&result),
        message: "Geofencing test completed".to_string(),
    })
}

/// Gate an attendance attempt on the student's location
///
/// Off-campus locations are refused with 403, unusable fixes with 400; in
/// both cases the verifier's reason is passed through verbatim.
pub fn validate_attendance_location(
    verifier: &GeofenceVerifier,
    req: &VerifyLocationRequest,
) -> Result<VerificationData, ApiError> {
    let (coordinate, accuracy) = parse_location(req, None)?;
    let result = verifier.verify_location(coordinate, accuracy);

    match &result {
        VerificationResult::Verified(_) => Ok(VerificationData::from(&result)),
        VerificationResult::Rejected(rejection @ Rejection::OutsideBoundary { .. }) => {
            Err(ApiError::forbidden(rejection.to_string()))
        },
        VerificationResult::Rejected(rejection) => Err(ApiError::bad_request(rejection.to_string())),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Extract a coordinate and accuracy without ever calling the verifier on partial input
fn parse_location(
    req: &VerifyLocationRequest,
    default_accuracy: Option<f64>,
) -> Result<(Coordinate, Option<f64>), ApiError> {
    let (Some(latitude), Some(longitude)) = (&req.latitude, &req.longitude) else {
        return Err(ApiError::bad_request("Latitude and longitude are required"));
    };

    let invalid = || ApiError::bad_request("Invalid coordinate format");
    let latitude = latitude.as_f64().ok_or_else(invalid)?;
    let longitude = longitude.as_f64().ok_or_else(invalid)?;
    let accuracy = match &req.accuracy {
        Some(value) => Some(value.as_f64().ok_or_else(invalid)?),
        None => default_accuracy,
    };

    Ok((Coordinate::new(latitude, longitude), accuracy))
}
