//! Geographic coordinates
//!
//! A [`Coordinate`] is always `(latitude, longitude)` in decimal degrees
//! (WGS-84). Nothing outside `core::services::geometry` ever sees the
//! planar `(x, y)` order used by the polygon test.

use serde::{Deserialize, Serialize};

/// Smallest valid latitude in degrees
pub const MIN_LATITUDE: f64 = -90.0;
/// Largest valid latitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;
/// Smallest valid longitude in degrees
pub const MIN_LONGITUDE: f64 = -180.0;
/// Largest valid longitude in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the earth's surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validating it
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside their valid ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }

    /// Latitude in radians
    #[must_use]
    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians
    #[must_use]
    pub fn longitude_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(latitude, longitude)`
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<[f64; 2]> for Coordinate {
    /// Interprets the array as `[latitude, longitude]`
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Whether an accuracy reading is usable (finite and non-negative)
#[must_use]
pub fn is_valid_accuracy(accuracy_m: f64) -> bool {
    accuracy_m.is_finite() && accuracy_m >= 0.0
}
