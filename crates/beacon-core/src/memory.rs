//! Grid-indexed in-memory event store.
//!
//! Records and their grid entries sit behind one [`RwLock`]. An upsert
//! takes the write lock for the whole record-plus-index update, so a scan
//! never observes a record without its index entry or an entry pointing
//! at a stale position. Scans share the read lock and run concurrently.

use std::collections::BTreeMap;

use beacon_geo::{BoundingBox, GeoError, GridIndex};
use beacon_types::{EventId, EventRecord};
use tokio::sync::RwLock;

use crate::store::{EventStore, StoreError};

/// Default grid cell edge in degrees (about 11 km of latitude).
pub const DEFAULT_CELL_SIZE_DEGREES: f64 = 0.1;

#[derive(Debug)]
struct Inner {
    records: BTreeMap<EventId, EventRecord>,
    index: GridIndex<EventId>,
}

/// In-memory [`EventStore`] backed by a [`GridIndex`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store whose grid uses `cell_size_degrees` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidCellSize`] for a non-positive, non-finite,
    /// or over-180 cell size.
    pub fn new(cell_size_degrees: f64) -> Result<Self, GeoError> {
        let index = GridIndex::new(cell_size_degrees)?;
        tracing::debug!(cell_size_degrees = index.cell_size(), "memory store created");
        Ok(Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                index,
            }),
        })
    }
}

impl EventStore for MemoryStore {
    async fn upsert(&self, record: EventRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        // Index first: it validates the coordinate and leaves both maps
        // untouched on failure.
        let previous = inner.index.insert(record.id, record.coordinate())?;
        if previous.is_some() {
            tracing::debug!(id = %record.id, "replacing existing event");
        }
        tracing::trace!(
            indexed = inner.index.len(),
            occupied_cells = inner.index.occupied_cells(),
            "grid updated"
        );
        inner.records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, StoreError> {
        Ok(self.inner.read().await.records.get(&id).cloned())
    }

    async fn scan(&self, bbox: &BoundingBox) -> Result<Vec<EventRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .index
            .candidates(bbox)
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.records.len())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use beacon_types::{Coordinate, EventType};

    use super::*;

    fn record(lat: f64, lng: f64) -> EventRecord {
        EventRecord {
            id: EventId::new(),
            lat,
            lng,
            title: String::from("Flooded underpass"),
            description: String::new(),
            event_type: EventType::Flooding,
        }
    }

    #[test]
    fn rejects_invalid_cell_size() {
        assert!(MemoryStore::new(0.0).is_err());
    }

    #[tokio::test]
    async fn upsert_then_get() {
        let store = MemoryStore::new(DEFAULT_CELL_SIZE_DEGREES).unwrap();
        let r = record(40.0, -75.0);
        store.upsert(r.clone()).await.unwrap();
        assert_eq!(store.get(r.id).await.unwrap(), Some(r));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upsert_replaces_and_reindexes() {
        let store = MemoryStore::new(DEFAULT_CELL_SIZE_DEGREES).unwrap();
        let mut r = record(40.0, -75.0);
        store.upsert(r.clone()).await.unwrap();
        r.lat = -33.0;
        r.lng = 151.0;
        store.upsert(r.clone()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let old = BoundingBox::around(Coordinate::new(40.0, -75.0), 1_000.0).unwrap();
        let new = BoundingBox::around(Coordinate::new(-33.0, 151.0), 1_000.0).unwrap();
        assert!(store.scan(&old).await.unwrap().is_empty());
        assert_eq!(store.scan(&new).await.unwrap(), vec![r]);
    }

    #[tokio::test]
    async fn invalid_record_is_not_stored() {
        let store = MemoryStore::new(DEFAULT_CELL_SIZE_DEGREES).unwrap();
        let err = store.upsert(record(95.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(GeoError::InvalidLatitude(_))));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn invalid_overwrite_keeps_previous_record() {
        let store = MemoryStore::new(DEFAULT_CELL_SIZE_DEGREES).unwrap();
        let r = record(10.0, 10.0);
        store.upsert(r.clone()).await.unwrap();
        let mut bad = r.clone();
        bad.lng = 200.0;
        assert!(store.upsert(bad).await.is_err());
        assert_eq!(store.get(r.id).await.unwrap(), Some(r));
    }
}
