//! Event records and the payloads that create them.
//!
//! Latitude and longitude are plain `f64` degrees on the wire. Range
//! checking happens in `beacon-geo`; these types only describe shape.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::EventType;
use crate::ids::EventId;

/// A point on the earth's surface in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coordinate {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A stored event marker as returned by radius queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventRecord {
    /// Unique, immutable identifier.
    pub id: EventId,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Short display title shown on the marker.
    pub title: String,
    /// Free-text description shown in the marker callout.
    pub description: String,
    /// Category tag used by the client to choose an icon.
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl EventRecord {
    /// The record's position.
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Body of an ingest request.
///
/// The identifier is optional: when absent the service assigns a fresh
/// one, when present an existing record with that id is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewEvent {
    /// Caller-supplied identifier for last-write-wins re-ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<EventId>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Short display title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Category tag.
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl NewEvent {
    /// The payload's position.
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Turn the payload into a record under the given identifier.
    pub fn into_record(self, id: EventId) -> EventRecord {
        EventRecord {
            id,
            lat: self.lat,
            lng: self.lng,
            title: self.title,
            description: self.description,
            event_type: self.event_type,
        }
    }
}
