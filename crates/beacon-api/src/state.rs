//! Shared application state for the HTTP server.

use beacon_core::{EventStore, ProximityService};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The service is read-mostly; concurrency control lives in
/// the store.
#[derive(Debug)]
pub struct AppState<S> {
    /// The proximity query service.
    pub service: ProximityService<S>,
}

impl<S: EventStore> AppState<S> {
    /// Create application state around a service.
    pub const fn new(service: ProximityService<S>) -> Self {
        Self { service }
    }
}
