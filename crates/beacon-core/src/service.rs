//! Radius queries and ingestion over an [`EventStore`].
//!
//! The service is stateless apart from its store handle and the default
//! radius. Every method is a pure function of its inputs and the store's
//! current contents; there is no loading or error state to track between
//! calls.

use std::collections::BTreeMap;

use beacon_geo::{BoundingBox, naive_within, validate_coordinate};
use beacon_types::{Coordinate, EventId, EventRecord, NewEvent};

use crate::error::ServiceError;
use crate::store::EventStore;

/// Radius the map screen asks for when it does not specify one.
pub const DEFAULT_RADIUS_METERS: f64 = 8_000.0;

/// Proximity query service over a storage backend.
#[derive(Debug)]
pub struct ProximityService<S> {
    store: S,
    default_radius_meters: f64,
}

impl<S: EventStore> ProximityService<S> {
    /// Wrap a store using [`DEFAULT_RADIUS_METERS`] as the default radius.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            default_radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    /// Set the radius used by [`query_default`](Self::query_default).
    #[must_use]
    pub const fn with_default_radius(mut self, radius_meters: f64) -> Self {
        self.default_radius_meters = radius_meters;
        self
    }

    /// The radius applied when a caller omits one.
    pub const fn default_radius_meters(&self) -> f64 {
        self.default_radius_meters
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Every event within `radius_meters` of `center`, nearest first.
    ///
    /// Equidistant events are ordered by id. An empty result is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] for an out-of-range
    /// center or a negative or non-finite radius, and
    /// [`ServiceError::Unavailable`] if the store cannot be reached.
    pub async fn query(
        &self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<EventRecord>, ServiceError> {
        let bbox = BoundingBox::around(center, radius_meters)?;
        let candidates = self.store.scan(&bbox).await?;
        let scanned = candidates.len();

        let mut by_id: BTreeMap<EventId, EventRecord> =
            candidates.into_iter().map(|r| (r.id, r)).collect();
        let hits = naive_within(
            center,
            radius_meters,
            by_id.iter().map(|(id, r)| (*id, r.coordinate())),
        );
        let results: Vec<EventRecord> = hits
            .into_iter()
            .filter_map(|hit| by_id.remove(&hit.key))
            .collect();

        tracing::debug!(
            lat = center.lat,
            lng = center.lng,
            radius_meters,
            scanned,
            matched = results.len(),
            "radius query"
        );
        Ok(results)
    }

    /// [`query`](Self::query) with the configured default radius.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn query_default(
        &self,
        center: Coordinate,
    ) -> Result<Vec<EventRecord>, ServiceError> {
        self.query(center, self.default_radius_meters).await
    }

    /// Store an event and return its identifier.
    ///
    /// A payload without an id gets a fresh one. A payload carrying the id
    /// of an existing event replaces that event.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidArgument`] for malformed coordinates
    /// (nothing is stored) and [`ServiceError::Unavailable`] if the store
    /// cannot be reached.
    pub async fn ingest(&self, event: NewEvent) -> Result<EventId, ServiceError> {
        validate_coordinate(event.coordinate())?;
        let id = event.id.unwrap_or_default();
        let record = event.into_record(id);
        tracing::debug!(
            %id,
            lat = record.lat,
            lng = record.lng,
            event_type = %record.event_type,
            "ingesting event"
        );
        self.store.upsert(record).await?;
        Ok(id)
    }

    /// Fetch a single event.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no event has this id.
    pub async fn get(&self, id: EventId) -> Result<EventRecord, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Number of stored events.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unavailable`] if the store cannot be reached.
    pub async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.count().await?)
    }
}
