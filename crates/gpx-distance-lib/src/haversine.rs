//! Great-circle distance on a spherical Earth
//!
//! The haversine formula is accurate for small distances and well-conditioned near zero,
//! which matters here because most track points lie close to the reference point.

use crate::GeoPoint;

/// Earth radius in meters.
///
/// This is the equatorial radius rather than the mean radius (6 371 008.8 m), so results
/// are slightly larger than a mean-radius haversine.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Calculate the great-circle distance between two points in meters
///
/// # Arguments
/// * `from` - Reference point in decimal degrees
/// * `to` - Target point in decimal degrees
///
/// # Returns
/// A distance in `[0, π · EARTH_RADIUS_M]`. Identical points yield exactly `0.0`.
#[inline]
pub fn distance(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Calculate the great-circle distance between two points on a sphere of `radius_m` meters
#[inline]
pub fn distance_with_radius(from: GeoPoint, to: GeoPoint, radius_m: f64) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = to.longitude.to_radians() - from.longitude.to_radians();

    let a = hav(delta_lat) + lat1.cos() * lat2.cos() * hav(delta_lon);

    // Rounding can push `a` just outside [0, 1] for coincident or antipodal points
    2.0 * radius_m * a.clamp(0.0, 1.0).sqrt().asin()
}

/// haversin(θ) = sin²(θ/2)
#[inline(always)]
fn hav(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}
