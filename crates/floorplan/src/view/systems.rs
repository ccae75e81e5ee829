use bevy::prelude::*;

use crate::events::EventLog;
use crate::settings::{VisibilitySettings, VisualSettings};
use crate::user_location::parse_location_payload;

use super::state::{FloorState, LayerOptions, MapInteraction, PendingLocation};

/// Clear the amenity filter whenever the floor changes, since the amenity
/// list is rebuilt per floor.
pub fn reset_amenity_on_floor_change(
    floors: Res<FloorState>,
    mut options: ResMut<LayerOptions>,
    mut last_floor: Local<Option<i32>>,
) {
    if !floors.is_changed() {
        return;
    }
    let current = floors.active_floor();
    if *last_floor == current {
        return;
    }
    let first_run = last_floor.is_none();
    *last_floor = current;
    if !first_run && options.amenity.is_some() {
        options.amenity = None;
    }
}

/// Re-seed the layer toggles when the stored default visibility changes.
/// Colour-only edits leave the user's toggles alone.
pub fn sync_visibility_from_settings(
    settings: Res<VisualSettings>,
    mut options: ResMut<LayerOptions>,
    mut seen: Local<Option<VisibilitySettings>>,
) {
    if !settings.is_changed() {
        return;
    }
    if seen.as_ref() == Some(&settings.default_visibility) {
        return;
    }
    *seen = Some(settings.default_visibility);
    options.sync_visibility(&settings.default_visibility);
}

/// Decode a location payload once floors are known.
pub fn apply_pending_location(
    mut pending: ResMut<PendingLocation>,
    mut floors: ResMut<FloorState>,
    mut interaction: ResMut<MapInteraction>,
) {
    let Some(payload) = pending.0.take() else {
        return;
    };
    let current = floors.active_floor().unwrap_or(crate::config::DEFAULT_FLOOR);
    match parse_location_payload(&payload, current) {
        Ok(location) => {
            info!(
                "User location set to ({:.5}, {:.5}) on level {}",
                location.latitude, location.longitude, location.level
            );
            interaction.place_user(location, &mut floors);
        }
        Err(e) => warn!("Ignoring location payload: {e}"),
    }
}

/// Close the event detail popup once its event has been deleted.
pub fn clear_stale_event_selection(
    events: Res<EventLog>,
    mut interaction: ResMut<MapInteraction>,
) {
    if !events.is_changed() {
        return;
    }
    let stale = interaction
        .selected_event
        .as_deref()
        .is_some_and(|id| events.get(id).is_none());
    if stale {
        interaction.selected_event = None;
    }
}
