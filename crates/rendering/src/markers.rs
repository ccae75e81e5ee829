//! Event pins and the simulated user position, drawn on the active floor.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use floorplan::config::DEFAULT_RELATIVE_HEIGHT;
use floorplan::events::{EventLog, MapEvent};
use floorplan::features::LngLat;
use floorplan::paint::extrusion_for;
use floorplan::view::{FloorState, MapInteraction};

use crate::projection::MapProjection;

/// Ground radius of an event marker, also its click radius.
pub const EVENT_MARKER_RADIUS: f32 = 2.5;
const USER_MARKER_RADIUS: f32 = 2.0;
const PIN_HEIGHT: f32 = 6.0;

const EVENT_COLOR: Color = Color::srgb(0.94, 0.27, 0.27);
const SELECTED_EVENT_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);
const USER_COLOR: Color = Color::srgb(0.15, 0.45, 0.95);

/// Markers sit on top of full-height rooms so they are never buried.
pub fn marker_height(floor: i32) -> f32 {
    extrusion_for(floor, DEFAULT_RELATIVE_HEIGHT).top + 0.2
}

pub fn event_ground(event: &MapEvent, projection: &MapProjection) -> Vec2 {
    projection.to_ground(LngLat::new(
        event.location.longitude,
        event.location.latitude,
    ))
}

fn flat(center: Vec3) -> Isometry3d {
    Isometry3d::new(center, Quat::from_rotation_x(FRAC_PI_2))
}

pub fn draw_event_markers(
    mut gizmos: Gizmos,
    floors: Res<FloorState>,
    events: Res<EventLog>,
    interaction: Res<MapInteraction>,
    projection: Res<MapProjection>,
) {
    let Some(floor) = floors.active_floor() else {
        return;
    };
    let height = marker_height(floor);
    for event in events.on_floor(floor) {
        let ground = event_ground(event, &projection);
        let center = Vec3::new(ground.x, height, ground.y);
        let selected = interaction.selected_event.as_deref() == Some(event.id.as_str());
        let color = if selected {
            SELECTED_EVENT_COLOR
        } else {
            EVENT_COLOR
        };
        gizmos.circle(flat(center), EVENT_MARKER_RADIUS, color);
        gizmos.circle(flat(center), EVENT_MARKER_RADIUS * 0.4, color);
        gizmos.line(center, center + Vec3::Y * PIN_HEIGHT, color);
    }
}

pub fn draw_user_marker(
    mut gizmos: Gizmos,
    floors: Res<FloorState>,
    interaction: Res<MapInteraction>,
    projection: Res<MapProjection>,
) {
    let (Some(floor), Some(location)) = (floors.active_floor(), interaction.user_location)
    else {
        return;
    };
    if location.level != floor {
        return;
    }
    let center = projection.to_world(
        LngLat::new(location.longitude, location.latitude),
        marker_height(floor),
    );
    gizmos.circle(flat(center), USER_MARKER_RADIUS, USER_COLOR);
    gizmos.circle(flat(center), USER_MARKER_RADIUS * 1.8, USER_COLOR.with_alpha(0.4));
}
