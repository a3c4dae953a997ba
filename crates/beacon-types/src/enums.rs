//! Enumeration types for the Beacon event service.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Category tag attached to every event marker.
///
/// The service never interprets the category; it is carried through to
/// the client, which picks the marker icon from it. The wire strings are
/// the display labels the mobile app has always used, including the
/// lowercase `Debris cleanup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// A tree is blocking a road or has fallen on property.
    #[serde(rename = "Downed Tree")]
    DownedTree,
    /// Someone is asking for supplies to be brought to them.
    #[serde(rename = "Request Supplies")]
    RequestSupplies,
    /// A power line is down or damaged.
    #[serde(rename = "Power Line")]
    PowerLine,
    /// A traffic light is out.
    #[serde(rename = "Traffic Light")]
    TrafficLight,
    /// Standing or rising water.
    Flooding,
    /// Someone needs transportation.
    #[serde(rename = "Need Ride")]
    NeedRide,
    /// Debris needs clearing.
    #[serde(rename = "Debris cleanup")]
    DebrisCleanup,
    /// Someone is offering supplies.
    #[serde(rename = "Provide Supplies")]
    ProvideSupplies,
    /// Someone is offering shelter.
    #[serde(rename = "Provide Shelter")]
    ProvideShelter,
    /// Anything that fits no other category.
    Misc,
}

impl EventType {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::DownedTree,
        Self::RequestSupplies,
        Self::PowerLine,
        Self::TrafficLight,
        Self::Flooding,
        Self::NeedRide,
        Self::DebrisCleanup,
        Self::ProvideSupplies,
        Self::ProvideShelter,
        Self::Misc,
    ];

    /// The wire label for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DownedTree => "Downed Tree",
            Self::RequestSupplies => "Request Supplies",
            Self::PowerLine => "Power Line",
            Self::TrafficLight => "Traffic Light",
            Self::Flooding => "Flooding",
            Self::NeedRide => "Need Ride",
            Self::DebrisCleanup => "Debris cleanup",
            Self::ProvideSupplies => "Provide Supplies",
            Self::ProvideShelter => "Provide Shelter",
            Self::Misc => "Misc",
        }
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
