//! Geographic primitives shared by the editing tools.
//!
//! Geometry is stored as latitude/longitude pairs. Anything that needs
//! metric comparisons (the eraser, polygon hit tests) works in a local
//! equirectangular plane centered on a reference point, which is accurate
//! enough for the few-kilometer areas a territory covers but not globally.
//!
//! - [`LocalPlane`]: projection into / out of the local metric plane
//! - [`point_in_ring`]: even-odd ray casting in geographic coordinates
//! - [`distance_sq_point_to_segment`]: squared planar distance (meters²)
//! - [`haversine_distance`]: great-circle distance, used for stroke spacing

use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_RADIUS_M, METERS_PER_DEGREE_LAT};


/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Linear interpolation in degree space (fine for short spans)
    pub fn lerp(self, other: Coordinate, t: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

/// Open polyline, at least two points when valid
pub type Path = Vec<Coordinate>;

/// Closed polygon boundary (last point connects to the first), at least three points when valid
pub type Ring = Vec<Coordinate>;

/// Equirectangular projection around an origin, in meters.
///
/// x grows east, y grows north.
#[derive(Debug, Clone, Copy)]
pub struct LocalPlane {
    origin: Coordinate,
    meters_per_degree_lng: f64,
}

impl LocalPlane {
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            meters_per_degree_lng: origin.lat.to_radians().cos() * METERS_PER_DEGREE_LAT,
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn project(&self, point: Coordinate) -> DVec2 {
        DVec2::new(
            (point.lng - self.origin.lng) * self.meters_per_degree_lng,
            (point.lat - self.origin.lat) * METERS_PER_DEGREE_LAT,
        )
    }

    pub fn unproject(&self, local: DVec2) -> Coordinate {
        Coordinate {
            lat: self.origin.lat + local.y / METERS_PER_DEGREE_LAT,
            lng: self.origin.lng + local.x / self.meters_per_degree_lng,
        }
    }
}

/// Even-odd ray casting test in geographic coordinates.
///
/// Points exactly on an edge may land on either side.
pub fn point_in_ring(point: Coordinate, ring: &[Coordinate]) -> bool {
    let mut inside = false;
    let mut j = match ring.len() {
        0 => return false,
        n => n - 1,
    };

    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);
        let crosses = (yi > point.lat) != (yj > point.lat)
            && point.lng < (xj - xi) * (point.lat - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Squared distance from `p` to the segment `a`-`b` in a planar frame
pub fn distance_sq_point_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Great-circle distance in meters
pub fn haversine_distance(p1: Coordinate, p2: Coordinate) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let d_phi = (p2.lat - p1.lat).to_radians();
    let d_lambda = (p2.lng - p1.lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
