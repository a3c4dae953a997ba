//! Error types for the `beacon-geo` crate.

/// Errors raised when a coordinate, radius, or index parameter is malformed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Latitude is not a finite value in `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude is not a finite value in `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    /// Radius is negative or not finite.
    #[error("radius {0} must be a non-negative finite number of meters")]
    InvalidRadius(f64),

    /// Grid cell size is not a finite value in `(0, 180]`.
    #[error("grid cell size {0} must be in (0, 180] degrees")]
    InvalidCellSize(f64),
}
