//! Error taxonomy for the proximity service.
//!
//! Callers see exactly three recoverable outcomes: their input was bad
//! (never worth retrying), the store could not be reached (retry with
//! backoff is the caller's decision), or a single-event lookup missed.
//! Anything else the storage backend reports surfaces as
//! [`ServiceError::Storage`].

use beacon_geo::GeoError;
use beacon_types::EventId;

use crate::store::StoreError;

/// Errors returned by [`ProximityService`](crate::ProximityService) operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A coordinate or radius was malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The event store could not be reached.
    #[error("event store unavailable: {0}")]
    Unavailable(String),

    /// No event exists with the requested identifier.
    #[error("event not found: {0}")]
    NotFound(EventId),

    /// The event store failed for a reason other than reachability.
    #[error("event store error: {0}")]
    Storage(String),
}

impl From<GeoError> for ServiceError {
    fn from(err: GeoError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::Unavailable(msg),
            StoreError::InvalidRecord(geo) => Self::from(geo),
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}
