//! Geometry for the Beacon proximity service.
//!
//! Everything here is pure and synchronous: coordinate validation, the
//! haversine distance, the bounding box used as a cheap pre-filter, and a
//! uniform grid index that narrows a radius query to the cells the box
//! overlaps. The naive linear scan is kept alongside as the reference the
//! indexed path must agree with.
//!
//! # Modules
//!
//! - [`distance`] -- Validation, haversine, and the radius predicate
//! - [`bbox`] -- Bounding box with antimeridian and pole handling
//! - [`grid`] -- Uniform lat/lng grid index
//! - [`naive`] -- Linear-scan reference and result ordering
//! - [`error`] -- Validation errors

pub mod bbox;
pub mod distance;
pub mod error;
pub mod grid;
pub mod naive;

pub use bbox::BoundingBox;
pub use distance::{
    DISTANCE_EPSILON_METERS, EARTH_RADIUS_METERS, haversine_meters, validate_coordinate,
    validate_radius, within_radius,
};
pub use error::GeoError;
pub use grid::{CellKey, GridIndex};
pub use naive::{Hit, naive_within, sort_hits};
