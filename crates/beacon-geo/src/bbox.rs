//! Bounding box around a query circle.
//!
//! The box is a cheap superset test: every point within the radius lies
//! inside it, so candidates outside can be skipped without computing a
//! distance. Latitude is clamped to the poles. Longitude wraps, so a box
//! whose `west` edge is numerically greater than its `east` edge crosses
//! the antimeridian and covers `[west, 180]` plus `[-180, east]`.

use core::f64::consts::PI;

use beacon_types::Coordinate;

use crate::distance::{EARTH_RADIUS_METERS, validate_coordinate, validate_radius};
use crate::error::GeoError;

/// Degrees added to every edge to absorb trigonometric rounding.
const EDGE_PADDING_DEGREES: f64 = 1e-6;

/// A latitude/longitude rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern latitude boundary.
    pub south: f64,
    /// Northern latitude boundary.
    pub north: f64,
    /// Western longitude boundary.
    pub west: f64,
    /// Eastern longitude boundary. Less than `west` when crossing the antimeridian.
    pub east: f64,
}

impl BoundingBox {
    /// The whole globe.
    pub const WORLD: Self = Self {
        south: -90.0,
        north: 90.0,
        west: -180.0,
        east: 180.0,
    };

    /// Smallest box containing every point within `radius_meters` of `center`.
    ///
    /// Uses the exact spherical longitude half-width `asin(sin δ / cos φ)`
    /// for angular radius `δ` at latitude `φ`. When the circle reaches a
    /// pole every meridian passes through it, so the longitude range
    /// becomes the full circle.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if the center or radius is malformed.
    pub fn around(center: Coordinate, radius_meters: f64) -> Result<Self, GeoError> {
        validate_coordinate(center)?;
        validate_radius(radius_meters)?;

        let angular = radius_meters / EARTH_RADIUS_METERS;
        if angular >= PI {
            return Ok(Self::WORLD);
        }

        let delta_lat = angular.to_degrees() + EDGE_PADDING_DEGREES;
        let south = (center.lat - delta_lat).max(-90.0);
        let north = (center.lat + delta_lat).min(90.0);

        if south <= -90.0 || north >= 90.0 {
            return Ok(Self {
                south,
                north,
                west: -180.0,
                east: 180.0,
            });
        }

        let ratio = angular.sin() / center.lat.to_radians().cos();
        if ratio >= 1.0 {
            return Ok(Self {
                south,
                north,
                west: -180.0,
                east: 180.0,
            });
        }

        let delta_lng = ratio.asin().to_degrees() + EDGE_PADDING_DEGREES;
        if delta_lng >= 180.0 {
            return Ok(Self {
                south,
                north,
                west: -180.0,
                east: 180.0,
            });
        }

        let mut west = center.lng - delta_lng;
        let mut east = center.lng + delta_lng;
        if west < -180.0 {
            west += 360.0;
        }
        if east > 180.0 {
            east -= 360.0;
        }

        Ok(Self {
            south,
            north,
            west,
            east,
        })
    }

    /// Whether the box wraps across the ±180° meridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Whether the box spans every longitude.
    pub fn spans_all_longitudes(&self) -> bool {
        self.west <= -180.0 && self.east >= 180.0
    }

    /// The one or two non-wrapping `(west, east)` longitude intervals the box covers.
    pub fn longitude_ranges(&self) -> impl Iterator<Item = (f64, f64)> {
        let (first, second) = if self.crosses_antimeridian() {
            ((self.west, 180.0), Some((-180.0, self.east)))
        } else {
            ((self.west, self.east), None)
        };
        core::iter::once(first).chain(second)
    }

    /// Whether a point lies inside the box.
    pub fn contains(&self, coord: Coordinate) -> bool {
        if coord.lat < self.south || coord.lat > self.north {
            return false;
        }
        if self.spans_all_longitudes() {
            return true;
        }
        self.longitude_ranges()
            .any(|(west, east)| coord.lng >= west && coord.lng <= east)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]

    use super::*;
    use crate::distance::haversine_meters;

    #[test]
    fn small_box_is_centered() {
        let center = Coordinate::new(40.0, -75.0);
        let bbox = BoundingBox::around(center, 2_000.0).unwrap();
        assert!(!bbox.crosses_antimeridian());
        assert!(bbox.south < 40.0 && bbox.north > 40.0);
        assert!(bbox.west < -75.0 && bbox.east > -75.0);
        // ~0.018 degrees of latitude for 2 km.
        assert!((bbox.north - 40.0 - 0.018).abs() < 0.001);
        // Longitude half-width widens by 1/cos(40deg).
        assert!(bbox.east + 75.0 > bbox.north - 40.0);
    }

    #[test]
    fn zero_radius_box_still_contains_center() {
        let center = Coordinate::new(-33.5, 151.25);
        let bbox = BoundingBox::around(center, 0.0).unwrap();
        assert!(bbox.contains(center));
    }

    #[test]
    fn wraps_east_across_antimeridian() {
        let bbox = BoundingBox::around(Coordinate::new(0.0, 179.9), 20_000.0).unwrap();
        assert!(bbox.crosses_antimeridian());
        assert!(bbox.contains(Coordinate::new(0.0, -179.95)));
        assert!(bbox.contains(Coordinate::new(0.0, 179.95)));
        assert!(!bbox.contains(Coordinate::new(0.0, 179.0)));
        assert!(!bbox.contains(Coordinate::new(0.0, -179.0)));
        assert_eq!(bbox.longitude_ranges().count(), 2);
    }

    #[test]
    fn wraps_west_across_antimeridian() {
        let bbox = BoundingBox::around(Coordinate::new(10.0, -179.95), 15_000.0).unwrap();
        assert!(bbox.crosses_antimeridian());
        assert!(bbox.contains(Coordinate::new(10.0, 179.95)));
        assert!(bbox.contains(Coordinate::new(10.0, -179.9)));
    }

    #[test]
    fn center_on_antimeridian_covers_both_signs() {
        let bbox = BoundingBox::around(Coordinate::new(0.0, 180.0), 0.0).unwrap();
        assert!(bbox.contains(Coordinate::new(0.0, 180.0)));
        assert!(bbox.contains(Coordinate::new(0.0, -180.0)));
    }

    #[test]
    fn near_pole_spans_all_longitudes() {
        let bbox = BoundingBox::around(Coordinate::new(89.99, 0.0), 5_000.0).unwrap();
        assert!(bbox.spans_all_longitudes());
        assert_eq!(bbox.north, 90.0);
        assert!(bbox.contains(Coordinate::new(89.995, 179.0)));
    }

    #[test]
    fn full_longitude_box_only_checks_latitude() {
        let bbox = BoundingBox::around(Coordinate::new(-89.95, 45.0), 20_000.0).unwrap();
        assert!(bbox.spans_all_longitudes());
        assert!(!bbox.crosses_antimeridian());
        for lng in [-180.0, -90.0, 0.0, 135.0, 180.0] {
            assert!(bbox.contains(Coordinate::new(-89.9, lng)), "lng {lng}");
        }
        assert!(!bbox.contains(Coordinate::new(-89.0, 45.0)));
        assert!(BoundingBox::WORLD.contains(Coordinate::new(90.0, -180.0)));
    }

    #[test]
    fn latitude_is_clamped() {
        let bbox = BoundingBox::around(Coordinate::new(-89.9, 30.0), 50_000.0).unwrap();
        assert_eq!(bbox.south, -90.0);
        assert!(bbox.north < -89.0);
    }

    #[test]
    fn huge_radius_is_the_world() {
        let bbox = BoundingBox::around(Coordinate::new(0.0, 0.0), 21_000_000.0).unwrap();
        assert_eq!(bbox, BoundingBox::WORLD);
    }

    #[test]
    fn circle_edge_points_are_inside() {
        let center = Coordinate::new(60.0, 25.0);
        let radius = 30_000.0;
        let bbox = BoundingBox::around(center, radius).unwrap();
        // Walk the circle and check every point on it sits in the box.
        let angular = radius / EARTH_RADIUS_METERS;
        let (phi, lambda) = (center.lat.to_radians(), center.lng.to_radians());
        for step in 0..360_u32 {
            let bearing = f64::from(step).to_radians();
            let lat2 = phi
                .sin()
                .mul_add(angular.cos(), phi.cos() * angular.sin() * bearing.cos())
                .asin();
            let lng2 = lambda
                + (bearing.sin() * angular.sin() * phi.cos())
                    .atan2((-phi.sin()).mul_add(lat2.sin(), angular.cos()));
            let point = Coordinate::new(lat2.to_degrees(), lng2.to_degrees());
            assert!((haversine_meters(center, point) - radius).abs() < 1e-3);
            assert!(bbox.contains(point), "edge point {point:?} outside {bbox:?}");
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(
            BoundingBox::around(Coordinate::new(95.0, 0.0), 10.0).unwrap_err(),
            GeoError::InvalidLatitude(95.0)
        );
        assert_eq!(
            BoundingBox::around(Coordinate::new(0.0, 0.0), -5.0).unwrap_err(),
            GeoError::InvalidRadius(-5.0)
        );
    }
}
