//! Business logic services
//!
//! Services contain pure business logic with no I/O.
//!
//! - `geometry` - Haversine distance and point-in-polygon containment
//! - `verifier` - The attendance geofence decision policy

pub mod geometry;
mod verifier;

pub use geometry::{EARTH_RADIUS_M, distance_to_polygon_m, haversine_m, point_in_polygon};
pub use verifier::{DEFAULT_MAX_ACCURACY_M, GeofenceVerifier, VerifierError};
