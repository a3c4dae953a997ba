//! Coordinate validation and great-circle distance.
//!
//! Distances use the haversine formula on a sphere of mean radius
//! [`EARTH_RADIUS_METERS`]. This is an approximation of the WGS84
//! ellipsoid, good to roughly 0.5% and well suited to the neighbourhood
//! radii the map screen asks for. It is not geodesic-exact.

use beacon_types::Coordinate;

use crate::error::GeoError;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Slack added to the radius when testing membership, so rounding in the
/// trigonometry never drops a point sitting on the circle.
pub const DISTANCE_EPSILON_METERS: f64 = 1e-6;

/// Check that a coordinate is finite and within WGS84 degree ranges.
///
/// # Errors
///
/// Returns [`GeoError::InvalidLatitude`] or [`GeoError::InvalidLongitude`].
pub fn validate_coordinate(coord: Coordinate) -> Result<(), GeoError> {
    if !coord.lat.is_finite() || !(-90.0..=90.0).contains(&coord.lat) {
        return Err(GeoError::InvalidLatitude(coord.lat));
    }
    if !coord.lng.is_finite() || !(-180.0..=180.0).contains(&coord.lng) {
        return Err(GeoError::InvalidLongitude(coord.lng));
    }
    Ok(())
}

/// Check that a query radius is a non-negative finite number of meters.
///
/// # Errors
///
/// Returns [`GeoError::InvalidRadius`].
pub fn validate_radius(radius_meters: f64) -> Result<(), GeoError> {
    if radius_meters.is_finite() && radius_meters >= 0.0 {
        Ok(())
    } else {
        Err(GeoError::InvalidRadius(radius_meters))
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi_a = a.lat.to_radians();
    let phi_b = b.lat.to_radians();
    let half_dphi = (b.lat - a.lat).to_radians() / 2.0;
    let half_dlambda = (b.lng - a.lng).to_radians() / 2.0;

    let sin_dphi = half_dphi.sin();
    let h = sin_dphi.mul_add(sin_dphi, phi_a.cos() * phi_b.cos() * half_dlambda.sin().powi(2));
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Return the distance to `point` if it lies within `radius_meters` of `center`.
pub fn within_radius(center: Coordinate, point: Coordinate, radius_meters: f64) -> Option<f64> {
    let distance = haversine_meters(center, point);
    (distance <= radius_meters + DISTANCE_EPSILON_METERS).then_some(distance)
}
