use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LIVE_FEED_LIMIT;

use super::types::{MapEvent, NewMapEvent};

/// All events of the current user, in insertion order.
///
/// Persisted as a plain JSON array. Single writer, last write wins.
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<MapEvent>,
}

impl EventLog {
    pub fn from_events(events: Vec<MapEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MapEvent> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Append an event, assigning it an id derived from `now` (milliseconds
    /// since the epoch, bumped until unique). Returns the new id.
    pub fn add(&mut self, event: NewMapEvent, now: DateTime<Utc>) -> String {
        let mut stamp = now.timestamp_millis();
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }
        let id = stamp.to_string();
        self.events.push(event.with_id(id.clone()));
        id
    }

    /// Replace the event with the same id. Returns `false` when no such
    /// event exists.
    pub fn update(&mut self, event: MapEvent) -> bool {
        match self.events.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => {
                *existing = event;
                true
            }
            None => false,
        }
    }

    /// Remove the event with `id`. Returns `false` when nothing was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|event| event.id != id);
        self.events.len() != before
    }

    /// Events pinned to `floor`, for map markers.
    pub fn on_floor(&self, floor: i32) -> impl Iterator<Item = &MapEvent> {
        self.events
            .iter()
            .filter(move |event| event.location.level == floor)
    }

    /// The live feed: events that have not ended, those happening now
    /// first, then by start time, capped at [`LIVE_FEED_LIMIT`].
    pub fn live_feed(&self, now: DateTime<Utc>) -> Vec<&MapEvent> {
        let mut upcoming: Vec<&MapEvent> = self
            .events
            .iter()
            .filter(|event| !event.has_ended(now))
            .collect();
        upcoming.sort_by_key(|event| (!event.is_happening(now), event.start_time));
        upcoming.truncate(LIVE_FEED_LIMIT);
        upcoming
    }
}
