//! Cursor picking on the active floor: hover names and event marker clicks.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use floorplan::config::DEFAULT_RELATIVE_HEIGHT;
use floorplan::events::{EventLog, MapEvent};
use floorplan::features::{Feature, FeatureCollection, Geometry, LngLat};
use floorplan::filter::RenderPasses;
use floorplan::geometry::hit_test;
use floorplan::loading::FeatureData;
use floorplan::paint::extrusion_for;
use floorplan::view::{FloorState, HoverInfo, MapInteraction};

use crate::camera::LeftClickDrag;
use crate::egui_input_guard::egui_wants_pointer;
use crate::feature_layers::LayerCache;
use crate::markers::{event_ground, EVENT_MARKER_RADIUS};
use crate::projection::MapProjection;
use crate::service_lines::polylines;

/// Hit tolerance for line and point features, in metres.
const HOVER_TOLERANCE_METERS: f32 = 1.5;

/// Where the cursor meets the active floor's room tops.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapCursor {
    pub ground: Option<Vec2>,
    pub position: Option<LngLat>,
}

pub fn update_map_cursor(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    floors: Res<FloorState>,
    projection: Res<MapProjection>,
    mut contexts: EguiContexts,
    mut cursor: ResMut<MapCursor>,
) {
    let next = cursor_on_floor(&windows, &camera_q, &floors, &projection, &mut contexts);
    if *cursor != next {
        *cursor = next;
    }
}

fn cursor_on_floor(
    windows: &Query<&Window>,
    camera_q: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    floors: &FloorState,
    projection: &MapProjection,
    contexts: &mut EguiContexts,
) -> MapCursor {
    let Some(floor) = floors.active_floor() else {
        return MapCursor::default();
    };
    if egui_wants_pointer(contexts) {
        return MapCursor::default();
    }
    let Ok(window) = windows.get_single() else {
        return MapCursor::default();
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return MapCursor::default();
    };
    let Some(screen_pos) = window.cursor_position() else {
        return MapCursor::default();
    };
    let Ok(ray) = camera.viewport_to_world(cam_transform, screen_pos) else {
        return MapCursor::default();
    };

    // Ray-plane intersection against the floor's room tops
    let plane_y = extrusion_for(floor, DEFAULT_RELATIVE_HEIGHT).top;
    if ray.direction.y.abs() <= 0.001 {
        return MapCursor::default();
    }
    let t = (plane_y - ray.origin.y) / ray.direction.y;
    if t <= 0.0 {
        return MapCursor::default();
    }
    let hit = ray.origin + ray.direction * t;
    let ground = Vec2::new(hit.x, hit.z);
    MapCursor {
        ground: Some(ground),
        position: Some(projection.to_lnglat(ground)),
    }
}

/// The topmost drawn, named feature under `point`. Service lines draw over
/// the fills, so they are tried first; within a pass later features draw
/// over earlier ones and the last hit wins. Only geometry that is actually
/// drawn counts: areas on the fill pass, polylines on the line pass.
pub fn named_feature_at<'a>(
    collection: &'a FeatureCollection,
    passes: &'a RenderPasses,
    point: LngLat,
    tolerance: f64,
) -> Option<&'a Feature> {
    let hit = |feature: &&Feature| {
        feature.name().is_some_and(|name| !name.is_empty())
            && feature
                .geometry
                .as_ref()
                .is_some_and(|geometry| hit_test(geometry, point, tolerance))
    };
    let line_hit = passes
        .line_features(collection)
        .filter(|feature| {
            feature
                .geometry
                .as_ref()
                .is_some_and(|geometry| !polylines(geometry).is_empty())
        })
        .filter(hit)
        .last();
    line_hit.or_else(|| {
        passes
            .fill_features(collection)
            .filter(|feature| feature.geometry.as_ref().is_some_and(Geometry::is_areal))
            .filter(hit)
            .last()
    })
}

pub fn update_hover(
    cursor: Res<MapCursor>,
    cache: Res<LayerCache>,
    data: Res<FeatureData>,
    projection: Res<MapProjection>,
    mut interaction: ResMut<MapInteraction>,
) {
    if !(cursor.is_changed() || cache.is_changed()) {
        return;
    }
    let hover = match (cursor.position, data.collection()) {
        (Some(point), Some(collection)) => named_feature_at(
            collection,
            &cache.passes,
            point,
            projection.meters_to_degrees(HOVER_TOLERANCE_METERS),
        )
        .and_then(|feature| {
            Some(HoverInfo {
                name: feature.name()?.to_string(),
                position: point,
            })
        }),
        _ => None,
    };
    if interaction.hover != hover {
        interaction.hover = hover;
    }
}

/// Nearest event marker within its radius of `ground`.
pub fn event_marker_at<'a>(
    events: impl Iterator<Item = &'a MapEvent>,
    projection: &MapProjection,
    ground: Vec2,
) -> Option<&'a MapEvent> {
    events
        .map(|event| (event, event_ground(event, projection).distance(ground)))
        .filter(|(_, distance)| *distance <= EVENT_MARKER_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(event, _)| event)
}

/// A left click (not a drag) on an event marker opens that event.
pub fn handle_marker_click(
    buttons: Res<ButtonInput<MouseButton>>,
    drag: Res<LeftClickDrag>,
    cursor: Res<MapCursor>,
    floors: Res<FloorState>,
    events: Res<EventLog>,
    projection: Res<MapProjection>,
    mut interaction: ResMut<MapInteraction>,
) {
    if !buttons.just_released(MouseButton::Left) || drag.is_dragging {
        return;
    }
    let (Some(ground), Some(floor)) = (cursor.ground, floors.active_floor()) else {
        return;
    };
    if let Some(event) = event_marker_at(events.on_floor(floor), &projection, ground) {
        interaction.selected_event = Some(event.id.clone());
    }
}
