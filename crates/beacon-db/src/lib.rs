//! `PostgreSQL` storage for the Beacon proximity service.
//!
//! [`PgEventStore`] implements [`beacon_core::EventStore`] over an
//! `events` table with a B-tree index on `(lat, lng)`. Radius queries
//! reach it as bounding-box range scans; exact distance filtering stays
//! in the service.
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, and migrations
//! - [`event_store`] -- Upsert, lookup, and range scan on `events`
//! - [`error`] -- Data-layer errors and their mapping to store errors

pub mod error;
pub mod event_store;
pub mod postgres;

// Re-export primary types for convenience.
pub use error::DbError;
pub use event_store::{EventRow, PgEventStore};
pub use postgres::{PostgresConfig, PostgresPool};
