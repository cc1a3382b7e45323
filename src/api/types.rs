//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use crate::core::models::{PolygonBounds, VerificationResult};
use crate::core::services::GeofenceVerifier;

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
///
/// Payload fields are flattened next to `success`, so a verification reads
/// `{"success": true, "gps_verified": ..., "reason": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(flatten)]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// A number that clients may send either as JSON number or numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    /// `26.8351`
    Number(f64),
    /// `"26.8351"`
    Text(String),
    /// Any other JSON value; never a number
    Other(serde_json::Value),
}

impl NumberValue {
    /// Numeric value, or `None` if the text is not a number
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

impl From<f64> for NumberValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Request body for location verification
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyLocationRequest {
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: Option<NumberValue>,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: Option<NumberValue>,
    /// Reported GPS accuracy in meters
    #[serde(default)]
    pub accuracy: Option<NumberValue>,
}

impl VerifyLocationRequest {
    /// Build a request from plain numbers
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f64>) -> Self {
        Self {
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            accuracy: accuracy.map(NumberValue::from),
        }
    }
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Verification verdict as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationData {
    /// Whether the location counts as on campus
    pub gps_verified: bool,
    /// Human-readable explanation
    pub reason: String,
    /// Distance from campus center in meters (null when the fix was unusable)
    pub distance: Option<f64>,
    /// Accuracy echoed from the request
    pub accuracy: Option<f64>,
    /// Campus name for verified locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Distance to the polygon outline for locations outside it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_boundary: Option<f64>,
}

impl From<&VerificationResult> for VerificationData {
    fn from(result: &VerificationResult) -> Self {
        Self {
            gps_verified: result.is_verified(),
            reason: result.reason(),
            distance: result.distance_m(),
            accuracy: result.accuracy_m(),
            campus: result.campus().map(str::to_string),
            distance_to_boundary: result.distance_to_boundary_m(),
        }
    }
}

/// Response for the geofencing self-test endpoint
#[derive(Debug, Serialize)]
pub struct TestLocationData {
    /// Verdict for the submitted location
    pub test_result: VerificationData,
    /// Fixed completion message
    pub message: String,
}

/// Response for the boundaries endpoint
#[derive(Debug, Serialize)]
pub struct BoundariesData {
    /// The loaded campus boundary
    pub boundaries: BoundaryInfo,
}

/// Campus center point
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CenterInfo {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Campus boundary as shown to clients
#[derive(Debug, Serialize)]
pub struct BoundaryInfo {
    /// Campus name
    pub name: String,
    /// Center the distance is measured from
    pub center: CenterInfo,
    /// Radius in meters (only decisive when there is no polygon)
    pub radius: Option<f64>,
    /// Outline as `[latitude, longitude]` pairs
    pub polygon: Option<Vec<[f64; 2]>>,
    /// Extent of the polygon
    pub bounds: Option<PolygonBounds>,
    /// Largest accepted GPS accuracy in meters
    pub max_accuracy: f64,
}

impl From<&GeofenceVerifier> for BoundaryInfo {
    fn from(verifier: &GeofenceVerifier) -> Self {
        let boundary = verifier.boundary();
        let center = boundary.center();
        Self {
            name: boundary.name().to_string(),
            center: CenterInfo {
                latitude: center.latitude,
                longitude: center.longitude,
            },
            radius: boundary.radius_m(),
            polygon: boundary
                .polygon()
                .map(|vertices| vertices.iter().map(|v| [v.latitude, v.longitude]).collect()),
            bounds: boundary.bounds(),
            max_accuracy: verifier.max_accuracy_m(),
        }
    }
}
