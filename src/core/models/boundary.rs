//! Campus boundary definition
//!
//! The boundary is built once at startup and never mutated afterwards.
//! All geometric invariants are checked by [`CampusBoundary::new`], so a
//! verifier holding a boundary never has to re-validate it per request.

use serde::Serialize;
use thiserror::Error;

use super::coordinate::Coordinate;

/// Errors that can occur when building a campus boundary
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum BoundaryError {
    /// Center coordinate out of range
    #[error("invalid campus center: {0}")]
    InvalidCenter(Coordinate),

    /// Radius is not a positive finite number
    #[error("invalid campus radius: {0}m, must be a positive number of meters")]
    InvalidRadius(f64),

    /// Polygon vertex out of range
    #[error("invalid polygon vertex #{index}: {vertex}")]
    InvalidVertex {
        /// Zero-based position of the vertex
        index: usize,
        /// The offending vertex
        vertex: Coordinate,
    },

    /// Polygon with fewer than three distinct vertices
    #[error("campus polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Neither a polygon nor a radius was configured
    #[error("campus boundary needs a polygon or a radius")]
    NoContainmentRule,
}

/// Axis-aligned extent of the campus polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolygonBounds {
    /// Southernmost latitude
    pub min_latitude: f64,
    /// Northernmost latitude
    pub max_latitude: f64,
    /// Westernmost longitude
    pub min_longitude: f64,
    /// Easternmost longitude
    pub max_longitude: f64,
}

/// The campus outline used for attendance checks
#[derive(Debug, Clone, PartialEq)]
pub struct CampusBoundary {
    name: String,
    center: Coordinate,
    radius_m: Option<f64>,
    polygon: Option<Vec<Coordinate>>,
}

impl CampusBoundary {
    /// Build a validated boundary
    ///
    /// A final vertex equal to the first is dropped; the polygon is always
    /// treated as implicitly closed.
    pub fn new(
        name: impl Into<String>,
        center: Coordinate,
        radius_m: Option<f64>,
        polygon: Option<Vec<Coordinate>>,
    ) -> Result<Self, BoundaryError> {
        if !center.is_valid() {
            return Err(BoundaryError::InvalidCenter(center));
        }

        if let Some(radius) = radius_m
            && !(radius.is_finite() && radius > 0.0)
        {
            return Err(BoundaryError::InvalidRadius(radius));
        }

        let polygon = polygon.map(normalize_polygon).transpose()?;

        if polygon.is_none() && radius_m.is_none() {
            return Err(BoundaryError::NoContainmentRule);
        }

        Ok(Self {
            name: name.into(),
            center,
            radius_m,
            polygon,
        })
    }

    /// Display name of the campus
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference point that distances are measured from
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Radius used when no polygon is configured
    #[must_use]
    pub const fn radius_m(&self) -> Option<f64> {
        self.radius_m
    }

    /// Polygon vertices in `(latitude, longitude)` order, without a closing vertex
    #[must_use]
    pub fn polygon(&self) -> Option<&[Coordinate]> {
        self.polygon.as_deref()
    }

    /// Min/max extent of the polygon, if one is configured
    #[must_use]
    pub fn bounds(&self) -> Option<PolygonBounds> {
        let polygon = self.polygon()?;
        let first = polygon.first()?;
        let init = PolygonBounds {
            min_latitude: first.latitude,
            max_latitude: first.latitude,
            min_longitude: first.longitude,
            max_longitude: first.longitude,
        };
        Some(polygon.iter().fold(init, |b, v| PolygonBounds {
            min_latitude: b.min_latitude.min(v.latitude),
            max_latitude: b.max_latitude.max(v.latitude),
            min_longitude: b.min_longitude.min(v.longitude),
            max_longitude: b.max_longitude.max(v.longitude),
        }))
    }
}

fn normalize_polygon(mut vertices: Vec<Coordinate>) -> Result<Vec<Coordinate>, BoundaryError> {
    if let Some((index, vertex)) = vertices.iter().enumerate().find(|(_, v)| !v.is_valid()) {
        return Err(BoundaryError::InvalidVertex {
            index,
            vertex: *vertex,
        });
    }

    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }

    if vertices.len() < 3 {
        return Err(BoundaryError::TooFewVertices(vertices.len()));
    }

    Ok(vertices)
}
