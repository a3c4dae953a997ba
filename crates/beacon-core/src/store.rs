//! The storage seam behind the proximity service.
//!
//! The service never talks to a database directly. It asks an
//! [`EventStore`] for the records inside a bounding box and does the exact
//! distance filtering itself, so a store only needs a coordinate range
//! scan. Returning extra records from [`EventStore::scan`] is harmless;
//! omitting one that lies in the box is a bug.

use std::future::Future;

use beacon_geo::{BoundingBox, GeoError};
use beacon_types::{EventId, EventRecord};

/// Errors reported by an [`EventStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store is unreachable (connection refused, pool
    /// exhausted or closed, I/O failure).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The record's coordinates are malformed and were not stored.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] GeoError),

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistent set of event records with a coordinate range scan.
///
/// An upsert must be all-or-nothing as seen by concurrent scans: either
/// the new record and its index entry are both visible, or neither is.
pub trait EventStore: Send + Sync {
    /// Store `record`, replacing any record with the same id.
    fn upsert(&self, record: EventRecord) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fetch a single record.
    fn get(&self, id: EventId)
    -> impl Future<Output = Result<Option<EventRecord>, StoreError>> + Send;

    /// Every record whose coordinate lies inside `bbox`. May include extras.
    fn scan(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Vec<EventRecord>, StoreError>> + Send;

    /// Number of stored records.
    fn count(&self) -> impl Future<Output = Result<usize, StoreError>> + Send;
}
