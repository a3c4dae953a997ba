//! The `events` table as an [`EventStore`].
//!
//! Upserts use `INSERT ... ON CONFLICT (id) DO UPDATE`, a single statement,
//! so concurrent scans see either the old row or the new one. Scans issue
//! one range query per longitude interval of the bounding box (two when
//! the box crosses the antimeridian) against the `(lat, lng)` index.

use beacon_core::{EventStore, StoreError};
use beacon_geo::{BoundingBox, validate_coordinate};
use beacon_types::{EventId, EventRecord, EventType};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// `PostgreSQL`-backed event store.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Create a store on an existing connection pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }

    /// Insert or replace a row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the statement fails.
    pub async fn upsert_row(&self, record: &EventRecord) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO events (id, lat, lng, title, description, event_type)
              VALUES ($1, $2, $3, $4, $5, $6::event_type)
              ON CONFLICT (id) DO UPDATE SET
                  lat = EXCLUDED.lat,
                  lng = EXCLUDED.lng,
                  title = EXCLUDED.title,
                  description = EXCLUDED.description,
                  event_type = EXCLUDED.event_type,
                  updated_at = now()",
        )
        .bind(record.id.into_inner())
        .bind(record.lat)
        .bind(record.lng)
        .bind(&record.title)
        .bind(&record.description)
        .bind(event_type_to_db(record.event_type))
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Upserted event row");
        Ok(())
    }

    /// Fetch one row by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::CorruptRow`] if the stored category is unknown.
    pub async fn fetch(&self, id: EventId) -> Result<Option<EventRecord>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"SELECT id, lat, lng, title, description, event_type::TEXT AS event_type
              FROM events
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventRow::into_record).transpose()
    }

    /// Every row whose coordinate lies inside `bbox`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a query fails, or
    /// [`DbError::CorruptRow`] if a stored category is unknown.
    pub async fn scan_box(&self, bbox: &BoundingBox) -> Result<Vec<EventRecord>, DbError> {
        let mut records = Vec::new();
        for (west, east) in bbox.longitude_ranges() {
            let rows = sqlx::query_as::<_, EventRow>(
                r"SELECT id, lat, lng, title, description, event_type::TEXT AS event_type
                  FROM events
                  WHERE lat BETWEEN $1 AND $2
                    AND lng BETWEEN $3 AND $4",
            )
            .bind(bbox.south)
            .bind(bbox.north)
            .bind(west)
            .bind(east)
            .fetch_all(&self.pool)
            .await?;

            for row in rows {
                records.push(row.into_record()?);
            }
        }

        tracing::debug!(count = records.len(), "Scanned event rows in bounding box");
        Ok(records)
    }

    /// Number of rows in `events`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_rows(&self) -> Result<usize, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;
        usize::try_from(count).map_err(|e| DbError::CorruptRow(format!("row count {count}: {e}")))
    }
}

/// Classify a data-layer failure, logging when the database is unreachable.
fn to_store_error(operation: &'static str, err: DbError) -> StoreError {
    if err.is_unavailable() {
        tracing::warn!(operation, error = %err, "PostgreSQL unavailable");
    } else {
        tracing::error!(operation, error = %err, "PostgreSQL operation failed");
    }
    StoreError::from(err)
}

impl EventStore for PgEventStore {
    async fn upsert(&self, record: EventRecord) -> Result<(), StoreError> {
        validate_coordinate(record.coordinate())?;
        self.upsert_row(&record)
            .await
            .map_err(|e| to_store_error("upsert", e))
    }

    async fn get(&self, id: EventId) -> Result<Option<EventRecord>, StoreError> {
        self.fetch(id).await.map_err(|e| to_store_error("get", e))
    }

    async fn scan(&self, bbox: &BoundingBox) -> Result<Vec<EventRecord>, StoreError> {
        self.scan_box(bbox)
            .await
            .map_err(|e| to_store_error("scan", e))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.count_rows()
            .await
            .map_err(|e| to_store_error("count", e))
    }
}

/// A row from the `events` table.
///
/// Uses runtime types rather than compile-time checked types to
/// avoid requiring a live database during builds.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Event identifier.
    pub id: Uuid,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Category as a string (cast from the `PostgreSQL` enum).
    pub event_type: String,
}

impl EventRow {
    /// Convert the row into an [`EventRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::CorruptRow`] if the category is unknown.
    pub fn into_record(self) -> Result<EventRecord, DbError> {
        let event_type = event_type_from_db(&self.event_type).ok_or_else(|| {
            DbError::CorruptRow(format!("event {} has unknown type {}", self.id, self.event_type))
        })?;
        Ok(EventRecord {
            id: EventId::from(self.id),
            lat: self.lat,
            lng: self.lng,
            title: self.title,
            description: self.description,
            event_type,
        })
    }
}

/// Convert an [`EventType`] variant to its `PostgreSQL` enum string.
const fn event_type_to_db(et: EventType) -> &'static str {
    match et {
        EventType::DownedTree => "downed_tree",
        EventType::RequestSupplies => "request_supplies",
        EventType::PowerLine => "power_line",
        EventType::TrafficLight => "traffic_light",
        EventType::Flooding => "flooding",
        EventType::NeedRide => "need_ride",
        EventType::DebrisCleanup => "debris_cleanup",
        EventType::ProvideSupplies => "provide_supplies",
        EventType::ProvideShelter => "provide_shelter",
        EventType::Misc => "misc",
    }
}

/// Parse a `PostgreSQL` enum string back into an [`EventType`].
fn event_type_from_db(value: &str) -> Option<EventType> {
    EventType::ALL
        .into_iter()
        .find(|et| event_type_to_db(*et) == value)
}
