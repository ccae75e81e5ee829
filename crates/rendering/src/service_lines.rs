//! Line pass: service paths drawn as thick gizmo polylines on the floor.

use bevy::prelude::*;

use floorplan::config::SERVICE_LINE_WIDTH;
use floorplan::features::{Geometry, LngLat};
use floorplan::loading::FeatureData;
use floorplan::paint::extrusion_for;
use floorplan::settings::{ColorSettings, VisualSettings};

use crate::feature_layers::LayerCache;
use crate::map_colors::hex_color;
use crate::projection::MapProjection;

/// Lines float just above the floor slab.
const LINE_LIFT: f32 = 0.1;

/// Parsed service path colour. Refreshed only when the settings change so a
/// bad stored value is reported once, not every frame.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ServicePathColor(pub Color);

impl Default for ServicePathColor {
    fn default() -> Self {
        Self(hex_color(&ColorSettings::default().service_paths))
    }
}

pub fn update_service_path_color(
    settings: Res<VisualSettings>,
    mut color: ResMut<ServicePathColor>,
) {
    if !settings.is_changed() {
        return;
    }
    let next = ServicePathColor(hex_color(&settings.colors.service_paths));
    if *color != next {
        *color = next;
    }
}

pub fn configure_line_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = SERVICE_LINE_WIDTH;
}

/// Every polyline of a geometry. Area outlines count; points do not.
pub fn polylines(geometry: &Geometry) -> Vec<&[LngLat]> {
    match geometry {
        Geometry::LineString(line) => vec![line.as_slice()],
        Geometry::MultiLineString(lines) => lines.iter().map(Vec::as_slice).collect(),
        Geometry::Polygon(rings) => rings.iter().map(Vec::as_slice).collect(),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .flat_map(|rings| rings.iter().map(Vec::as_slice))
            .collect(),
        Geometry::Point(_) | Geometry::MultiPoint(_) => Vec::new(),
    }
}

pub fn draw_service_paths(
    mut gizmos: Gizmos,
    cache: Res<LayerCache>,
    data: Res<FeatureData>,
    color: Res<ServicePathColor>,
    projection: Res<MapProjection>,
) {
    let (Some(collection), Some(floor)) = (data.collection(), cache.floor) else {
        return;
    };
    if cache.passes.line.is_empty() {
        return;
    }
    let height = extrusion_for(floor, 0.0).base + LINE_LIFT;
    for feature in cache.passes.line_features(collection) {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        for line in polylines(geometry) {
            gizmos.linestrip(
                line.iter().map(|p| projection.to_world(*p, height)),
                color.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_app() -> App {
        let mut app = App::new();
        app.init_resource::<VisualSettings>()
            .init_resource::<ServicePathColor>()
            .add_systems(Update, update_service_path_color);
        app
    }

    #[test]
    fn test_service_path_color_follows_settings() {
        let mut app = color_app();
        app.update();
        assert_eq!(
            app.world().resource::<ServicePathColor>().0,
            hex_color("#ffff00")
        );

        app.world_mut()
            .resource_mut::<VisualSettings>()
            .colors
            .service_paths = "not a colour".to_string();
        app.update();
        assert_eq!(
            app.world().resource::<ServicePathColor>().0,
            crate::map_colors::FALLBACK_COLOR
        );
    }

    #[test]
    fn test_service_path_color_is_not_reparsed_without_changes() {
        let mut app = color_app();
        app.update();

        // Stand-in value; only a settings change may overwrite it.
        app.world_mut().resource_mut::<ServicePathColor>().0 = Color::BLACK;
        app.update();
        assert_eq!(app.world().resource::<ServicePathColor>().0, Color::BLACK);
    }

    #[test]
    fn test_polylines_cover_lines_and_outlines() {
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(1.0, 0.0);
        assert_eq!(polylines(&Geometry::LineString(vec![a, b])).len(), 1);
        assert_eq!(
            polylines(&Geometry::MultiPolygon(vec![vec![vec![a, b]], vec![vec![b, a]]])).len(),
            2
        );
        assert!(polylines(&Geometry::Point(a)).is_empty());
    }
}
