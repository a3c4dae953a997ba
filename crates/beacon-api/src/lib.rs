//! HTTP API for the Beacon event proximity service.
//!
//! This crate exposes [`ProximityService`](beacon_core::ProximityService)
//! as a small REST surface consumed by the mobile map screen:
//!
//! - `GET /events?lat=..&lng=..&radiusMeters=..` -- events near a point
//! - `POST /events` -- report a new event
//! - `GET /events/{id}` -- a single event
//! - `GET /health` -- liveness plus event count
//!
//! Handlers are generic over the [`EventStore`](beacon_core::EventStore),
//! so the same router serves the in-memory store and `PostgreSQL`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
