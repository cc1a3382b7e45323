//! Spherical and planar geometry for geofencing
//!
//! Public functions take [`Coordinate`]s in `(latitude, longitude)` order.
//! The polygon test works on planar points with `x = longitude` and
//! `y = latitude`; that conversion happens in [`PlanarPoint::from`] and
//! nowhere else.

use crate::core::models::Coordinate;

/// Mean earth radius used by the haversine formula, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`].
#[must_use]
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude_rad();
    let lat2 = b.latitude_rad();
    let dlat = lat2 - lat1;
    let dlon = b.longitude_rad() - a.longitude_rad();

    let h = (lat1.cos() * lat2.cos()).mul_add((dlon / 2.0).sin().powi(2), (dlat / 2.0).sin().powi(2));
    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// A point in the plane used by the ray-casting test
#[derive(Debug, Clone, Copy)]
struct PlanarPoint {
    x: f64,
    y: f64,
}

impl From<Coordinate> for PlanarPoint {
    fn from(c: Coordinate) -> Self {
        Self {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

/// Whether `point` lies inside `polygon` by the even-odd rule
///
/// A horizontal ray is cast from the point and every crossing of a polygon
/// edge toggles the result. The polygon is implicitly closed. Horizontal
/// edges never toggle. Vertex winding does not matter.
#[must_use]
#[allow(clippy::float_cmp)] // exact equality identifies horizontal and vertical edges
pub fn point_in_polygon(point: Coordinate, polygon: &[Coordinate]) -> bool {
    let PlanarPoint { x, y } = PlanarPoint::from(point);
    let mut inside = false;

    for (i, &v) in polygon.iter().enumerate() {
        let p1 = PlanarPoint::from(v);
        let p2 = PlanarPoint::from(polygon[(i + 1) % polygon.len()]);

        if p1.y == p2.y {
            continue;
        }

        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            let x_intersection = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            if p1.x == p2.x || x <= x_intersection {
                inside = !inside;
            }
        }
    }

    inside
}

/// Shortest distance in meters from `point` to any edge of `polygon`
///
/// The nearest point on each edge is located in a local equirectangular
/// projection centred on `point`, then measured with [`haversine_m`].
/// Returns `None` for an empty polygon.
#[must_use]
pub fn distance_to_polygon_m(point: Coordinate, polygon: &[Coordinate]) -> Option<f64> {
    let projection = LocalProjection::around(point);

    polygon
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            let b = polygon[(i + 1) % polygon.len()];
            let foot =
                LocalProjection::nearest_on_segment(projection.project(a), projection.project(b));
            haversine_m(point, projection.unproject(foot))
        })
        .reduce(f64::min)
}

/// Normalize a longitude (or longitude difference) into `[-180, 180)`
fn wrap_longitude(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Equirectangular projection in meters around an origin
#[derive(Debug, Clone, Copy)]
struct LocalProjection {
    origin: Coordinate,
    meters_per_lon_rad: f64,
}

impl LocalProjection {
    fn around(origin: Coordinate) -> Self {
        Self {
            origin,
            meters_per_lon_rad: EARTH_RADIUS_M * origin.latitude_rad().cos().max(1e-12),
        }
    }

    fn project(&self, c: Coordinate) -> PlanarPoint {
        PlanarPoint {
            x: wrap_longitude(c.longitude - self.origin.longitude).to_radians()
                * self.meters_per_lon_rad,
            y: (c.latitude - self.origin.latitude).to_radians() * EARTH_RADIUS_M,
        }
    }

    fn unproject(&self, p: PlanarPoint) -> Coordinate {
        Coordinate::new(
            self.origin.latitude + (p.y / EARTH_RADIUS_M).to_degrees(),
            wrap_longitude(self.origin.longitude + (p.x / self.meters_per_lon_rad).to_degrees()),
        )
    }

    /// Closest point to the origin on the segment `a`-`b`
    fn nearest_on_segment(a: PlanarPoint, b: PlanarPoint) -> PlanarPoint {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx.mul_add(dx, dy * dy);
        if len_sq < f64::MIN_POSITIVE {
            return a;
        }
        let t = (-(a.x.mul_add(dx, a.y * dy)) / len_sq).clamp(0.0, 1.0);
        PlanarPoint {
            x: t.mul_add(dx, a.x),
            y: t.mul_add(dy, a.y),
        }
    }
}
