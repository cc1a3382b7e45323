//! Core domain logic for geofence
//!
//! This module contains pure business logic with no I/O dependencies.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Coordinate, `CampusBoundary`, `VerificationResult`)
//! - `services/` - Geometry and the verifier built on top of it

pub mod models;
pub mod services;
