//! Proximity query service for the Beacon event map.
//!
//! Given a center point and a radius in meters, [`ProximityService`]
//! returns every stored event within that radius, nearest first. Events
//! come in through [`ProximityService::ingest`] and live in an
//! [`EventStore`]: the in-memory [`MemoryStore`] keeps a grid index, and
//! `beacon-db` provides a `PostgreSQL` implementation.
//!
//! # Query pipeline
//!
//! ```text
//! (center, radius)
//!     |
//!     +-- validate + bounding box ----> beacon_geo::BoundingBox
//!     +-- candidate scan -------------> EventStore::scan (grid cells / SQL range)
//!     +-- exact haversine filter -----> beacon_geo::naive_within
//!     +-- sort by (distance, id) -----> Vec<EventRecord>
//! ```
//!
//! # Modules
//!
//! - [`service`] -- Query, ingest, and lookup operations
//! - [`store`] -- The storage trait and its error type
//! - [`memory`] -- Grid-indexed in-memory store
//! - [`config`] -- YAML configuration
//! - [`error`] -- Service error taxonomy

pub mod config;
pub mod error;
pub mod memory;
pub mod service;
pub mod store;

pub use config::{BeaconConfig, ConfigError, LogFormat, StorageBackend};
pub use error::ServiceError;
pub use memory::MemoryStore;
pub use service::ProximityService;
pub use store::{EventStore, StoreError};
