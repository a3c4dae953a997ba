//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS enabled for
//! the mobile client and request tracing via `tower-http`.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use beacon_core::EventStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /events` -- radius query
/// - `POST /events` -- ingest
/// - `GET /events/{id}` -- single event
/// - `GET /health` -- liveness and event count
pub fn build_router<S: EventStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/events",
            get(handlers::list_events::<S>).post(handlers::create_event::<S>),
        )
        .route("/events/{id}", get(handlers::get_event::<S>))
        .route("/health", get(handlers::health::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
