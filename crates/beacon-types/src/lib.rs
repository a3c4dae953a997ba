//! Shared type definitions for the Beacon event proximity service.
//!
//! This crate is the single source of truth for the records exchanged
//! between the mobile client and the service. Types flow downstream to
//! `TypeScript` via `ts-rs` so the map screen renders markers from the
//! same definitions the server validates.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for event identifiers
//! - [`enums`] -- Event category tags
//! - [`structs`] -- Event records, ingest payloads, and coordinates

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::EventType;
pub use ids::EventId;
pub use structs::{Coordinate, EventRecord, NewEvent};
