//! Domain models for geofence verification
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Coordinate`] - A `(latitude, longitude)` point in decimal degrees
//! - [`CampusBoundary`] - The campus outline: center, radius, polygon
//! - [`VerificationResult`] - Verified, or rejected with a [`Rejection`]

mod boundary;
mod coordinate;
mod verification;

pub use boundary::{BoundaryError, CampusBoundary, PolygonBounds};
pub use coordinate::{
    Coordinate, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, is_valid_accuracy,
};
pub use verification::{
    INVALID_COORDINATES_REASON, Rejection, VERIFIED_REASON, VerificationResult, Verified,
};
