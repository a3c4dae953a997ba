//! REST endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/events` | Events within a radius, nearest first |
//! | `POST` | `/events` | Ingest an event, returns `201 {id}` |
//! | `GET` | `/events/{id}` | Single event |
//! | `GET` | `/health` | Liveness and stored event count |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use beacon_core::EventStore;
use beacon_types::{Coordinate, EventId, NewEvent};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Query parameters for `GET /events`.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Center latitude in degrees.
    pub lat: f64,
    /// Center longitude in degrees.
    pub lng: f64,
    /// Search radius in meters. Falls back to the configured default.
    #[serde(rename = "radiusMeters")]
    pub radius_meters: Option<f64>,
}

/// Response body for `POST /events`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreatedEvent {
    /// Identifier of the stored event.
    pub id: EventId,
}

// ---------------------------------------------------------------------------
// GET /events -- radius query
// ---------------------------------------------------------------------------

/// Return every event within `radiusMeters` of `(lat, lng)`, nearest first.
///
/// The body is a bare JSON array of event records.
pub async fn list_events<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let center = Coordinate::new(params.lat, params.lng);
    let radius = params
        .radius_meters
        .unwrap_or_else(|| state.service.default_radius_meters());

    let events = state.service.query(center, radius).await?;
    Ok(Json(events))
}

// ---------------------------------------------------------------------------
// POST /events -- ingest
// ---------------------------------------------------------------------------

/// Store a reported event and return its identifier with `201 Created`.
pub async fn create_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(event) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = state.service.ingest(event).await?;
    tracing::info!(%id, "event ingested");
    Ok((StatusCode::CREATED, Json(CreatedEvent { id })))
}

// ---------------------------------------------------------------------------
// GET /events/{id} -- single event
// ---------------------------------------------------------------------------

/// Return a single event by id.
pub async fn get_event<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = id_str
        .parse::<EventId>()
        .map_err(|e| ApiError::InvalidId(format!("{id_str}: {e}")))?;
    let event = state.service.get(id).await?;
    Ok(Json(event))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report liveness and the number of stored events.
///
/// Fails with `503` when the store is unreachable, so load balancers
/// stop routing to an instance that cannot answer queries.
pub async fn health<S: EventStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let events = state.service.count().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "events": events,
    })))
}
