use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an event happens.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub level: i32,
}

/// A time-bound event pinned to a map location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: EventLocation,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// An event before it has been given an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMapEvent {
    pub title: String,
    pub description: String,
    pub location: EventLocation,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewMapEvent {
    pub fn with_id(self, id: String) -> MapEvent {
        MapEvent {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl MapEvent {
    /// Started and not yet over (both ends inclusive).
    pub fn is_happening(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time <= now
    }
}
