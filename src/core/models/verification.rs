//! Verification outcomes
//!
//! A verification never fails with an error: every outcome, including bad
//! input, is a [`VerificationResult`] the caller can turn into a response.

/// Reason reported for a location inside the boundary
pub const VERIFIED_REASON: &str = "Location verified within campus boundary";

/// Reason reported for out-of-range coordinates
pub const INVALID_COORDINATES_REASON: &str = "Invalid GPS coordinates";

/// A location that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct Verified {
    /// Great-circle distance from the campus center, in meters
    pub distance_m: f64,
    /// Accuracy reported by the client, echoed back
    pub accuracy_m: Option<f64>,
    /// Name of the campus the location was matched to
    pub campus: String,
}

/// Why a location was not accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Coordinates (or the accuracy reading) were malformed or out of range
    InvalidCoordinate {
        /// Accuracy reported by the client, echoed back
        accuracy_m: Option<f64>,
    },

    /// The fix is too uncertain to trust
    AccuracyTooLow {
        /// Accuracy reported by the client
        accuracy_m: f64,
        /// Largest accuracy radius the verifier accepts
        max_accuracy_m: f64,
    },

    /// A trustworthy fix that lies outside the campus
    OutsideBoundary {
        /// Great-circle distance from the campus center, in meters
        distance_m: f64,
        /// Accuracy reported by the client, echoed back
        accuracy_m: Option<f64>,
        /// Radius limit, when containment was decided by radius
        radius_m: Option<f64>,
        /// Distance to the nearest polygon edge, when a polygon is configured
        distance_to_boundary_m: Option<f64>,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCoordinate { .. } => f.write_str(INVALID_COORDINATES_REASON),
            Self::AccuracyTooLow {
                accuracy_m,
                max_accuracy_m,
            } => write!(
                f,
                "GPS accuracy too low: {accuracy_m}m (required: <= {max_accuracy_m}m)"
            ),
            Self::OutsideBoundary {
                distance_m,
                radius_m,
                ..
            } => {
                write!(f, "Location outside campus boundary: {distance_m:.1}m from center")?;
                if let Some(radius) = radius_m {
                    write!(f, " (limit: {radius:.1}m)")?;
                }
                Ok(())
            },
        }
    }
}

/// Outcome of a single location verification
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    /// The location counts as on campus
    Verified(Verified),
    /// The location was rejected
    Rejected(Rejection),
}

impl VerificationResult {
    /// Whether the location was accepted
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }

    /// Human-readable explanation, suitable for showing to the student
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Verified(_) => VERIFIED_REASON.to_string(),
            Self::Rejected(rejection) => rejection.to_string(),
        }
    }

    /// Distance from the campus center, absent when the fix was unusable
    #[must_use]
    pub const fn distance_m(&self) -> Option<f64> {
        match self {
            Self::Verified(v) => Some(v.distance_m),
            Self::Rejected(Rejection::OutsideBoundary { distance_m, .. }) => Some(*distance_m),
            Self::Rejected(_) => None,
        }
    }

    /// The accuracy reading that was supplied with the request
    #[must_use]
    pub const fn accuracy_m(&self) -> Option<f64> {
        match self {
            Self::Verified(v) => v.accuracy_m,
            Self::Rejected(
                Rejection::InvalidCoordinate { accuracy_m }
                | Rejection::OutsideBoundary { accuracy_m, .. },
            ) => *accuracy_m,
            Self::Rejected(Rejection::AccuracyTooLow { accuracy_m, .. }) => Some(*accuracy_m),
        }
    }

    /// Campus name for verified locations
    #[must_use]
    pub fn campus(&self) -> Option<&str> {
        match self {
            Self::Verified(v) => Some(&v.campus),
            Self::Rejected(_) => None,
        }
    }

    /// Distance to the polygon outline for locations rejected as outside
    #[must_use]
    pub const fn distance_to_boundary_m(&self) -> Option<f64> {
        match self {
            Self::Rejected(Rejection::OutsideBoundary {
                distance_to_boundary_m,
                ..
            }) => *distance_to_boundary_m,
            _ => None,
        }
    }

    /// The rejection, if any
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Verified(_) => None,
            Self::Rejected(r) => Some(r),
        }
    }
}
