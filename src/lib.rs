//! geofence - Campus geofence verification for hostel night attendance
//!
//! This library decides whether a reported GPS fix counts as "on campus":
//! haversine distance from the campus center, ray-casting containment in the
//! campus polygon (or a radius fallback), and an accuracy gate. Verdicts are
//! values, never errors, so an HTTP handler can always build a response.
//!
//! ```
//! use geofence::core::models::{CampusBoundary, Coordinate};
//! use geofence::core::services::GeofenceVerifier;
//!
//! let boundary = CampusBoundary::new(
//!     "Campus",
//!     Coordinate::new(26.8351, 75.6508),
//!     Some(800.0),
//!     None,
//! )
//! .unwrap();
//! let verifier = GeofenceVerifier::new(boundary, 500.0).unwrap();
//!
//! assert!(verifier.verify_location(Coordinate::new(26.8351, 75.6508), Some(20.0)).is_verified());
//! assert!(!verifier.verify_location(Coordinate::new(26.8431, 75.6508), None).is_verified());
//! ```

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
