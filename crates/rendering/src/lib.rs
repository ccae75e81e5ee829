use bevy::prelude::*;

pub mod camera;
pub mod egui_input_guard;
pub mod feature_layers;
pub mod floor_mesh;
pub mod map_colors;
pub mod markers;
pub mod picking;
pub mod projection;
pub mod service_lines;

use camera::{CameraOrbitDrag, LeftClickDrag};
use feature_layers::{FillMaterials, LayerCache};
use floorplan::FloorplanSet;
use picking::MapCursor;
use projection::MapProjection;

/// Map drawing: camera, extruded fills, service-path lines, markers and
/// cursor picking. Expects `EguiPlugin` and `FloorplanPlugin`.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapProjection>()
            .init_resource::<LeftClickDrag>()
            .init_resource::<CameraOrbitDrag>()
            .init_resource::<LayerCache>()
            .init_resource::<FillMaterials>()
            .init_resource::<MapCursor>()
            .init_resource::<service_lines::ServicePathColor>()
            .insert_resource(ClearColor(Color::srgb(0.93, 0.94, 0.96)))
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    service_lines::configure_line_gizmos,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_left_drag,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::follow_active_floor.after(FloorplanSet),
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    feature_layers::update_layer_cache,
                    feature_layers::rebuild_fill_meshes,
                )
                    .chain()
                    .after(FloorplanSet),
            )
            .add_systems(
                Update,
                (
                    picking::update_map_cursor,
                    picking::update_hover,
                    picking::handle_marker_click,
                )
                    .chain()
                    .after(feature_layers::update_layer_cache)
                    .after(camera::apply_orbit_camera),
            )
            .add_systems(
                Update,
                (
                    service_lines::update_service_path_color
                        .before(service_lines::draw_service_paths),
                    service_lines::draw_service_paths,
                    markers::draw_event_markers,
                    markers::draw_user_marker,
                )
                    .after(feature_layers::update_layer_cache),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.95, 0.95, 1.0),
        brightness: 500.0,
    });

    // Soft key light from above, no shadows between translucent floors
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}
