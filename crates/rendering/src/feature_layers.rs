//! The two map layers: extruded fills and service-path lines.
//!
//! [`LayerCache`] holds the feature indices of both passes for the active
//! floor and is recomputed only when the data, floor or layer options
//! change. Fill meshes are merged per colour and rebuilt when the cache or
//! the colour settings change.

use std::collections::{BTreeMap, HashMap};

use bevy::prelude::*;

use floorplan::config::FILL_OPACITY;
use floorplan::features::{FeatureCollection, Geometry, LngLat};
use floorplan::filter::RenderPasses;
use floorplan::loading::FeatureData;
use floorplan::paint::{extrusion_for, resolve_paint};
use floorplan::settings::{ColorSettings, VisualSettings};
use floorplan::view::{FloorState, LayerOptions};

use crate::floor_mesh::ExtrudedMeshData;
use crate::map_colors::fill_color;
use crate::projection::MapProjection;

/// Render passes for the floor on screen. `floor` is `None` while there is
/// nothing to draw.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerCache {
    pub floor: Option<i32>,
    pub passes: RenderPasses,
}

/// Marker for merged fill meshes; despawned on every rebuild.
#[derive(Component)]
pub struct FloorFill;

/// One translucent material per fill colour.
#[derive(Resource, Default)]
pub struct FillMaterials(HashMap<String, Handle<StandardMaterial>>);

impl FillMaterials {
    fn get_or_add(
        &mut self,
        hex: &str,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.0
            .entry(hex.to_string())
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: fill_color(hex, FILL_OPACITY),
                    alpha_mode: AlphaMode::Blend,
                    perceptual_roughness: 0.9,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone()
    }
}

pub fn update_layer_cache(
    data: Res<FeatureData>,
    floors: Res<FloorState>,
    options: Res<LayerOptions>,
    mut cache: ResMut<LayerCache>,
) {
    if !(data.is_changed() || floors.is_changed() || options.is_changed()) {
        return;
    }
    let next = match (data.collection(), floors.active_floor()) {
        (Some(collection), Some(floor)) => LayerCache {
            floor: Some(floor),
            passes: options.layer_filter(floor).split(collection),
        },
        _ => LayerCache::default(),
    };
    if *cache != next {
        *cache = next;
    }
}

/// Group the fill pass into one mesh per colour.
pub fn build_fill_meshes(
    collection: &FeatureCollection,
    passes: &RenderPasses,
    floor: i32,
    colors: &ColorSettings,
    projection: &MapProjection,
) -> BTreeMap<String, ExtrudedMeshData> {
    let mut groups: BTreeMap<String, ExtrudedMeshData> = BTreeMap::new();
    for feature in passes.fill_features(collection) {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        let polygons: Vec<&Vec<LngLat>> = match geometry {
            Geometry::Polygon(rings) => rings.first().into_iter().collect(),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().filter_map(|rings| rings.first()).collect()
            }
            // Extrusions only apply to areas.
            _ => continue,
        };
        let paint = resolve_paint(&feature.tags, colors);
        let extrusion = extrusion_for(floor, paint.relative_height);
        let data = groups.entry(paint.color.to_string()).or_default();
        for ring in polygons {
            let ground: Vec<Vec2> = ring.iter().map(|p| projection.to_ground(*p)).collect();
            data.add_prism(&ground, extrusion.base, extrusion.top);
        }
    }
    groups.retain(|_, data| !data.is_empty());
    groups
}

#[allow(clippy::too_many_arguments)]
pub fn rebuild_fill_meshes(
    mut commands: Commands,
    cache: Res<LayerCache>,
    settings: Res<VisualSettings>,
    data: Res<FeatureData>,
    projection: Res<MapProjection>,
    existing: Query<Entity, With<FloorFill>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut fill_materials: ResMut<FillMaterials>,
) {
    if !(cache.is_changed() || settings.is_changed()) {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    let (Some(collection), Some(floor)) = (data.collection(), cache.floor) else {
        return;
    };

    let groups = build_fill_meshes(
        collection,
        &cache.passes,
        floor,
        &settings.colors,
        &projection,
    );
    let mut triangles = 0;
    for (hex, mesh_data) in groups {
        triangles += mesh_data.triangle_count();
        let material = fill_materials.get_or_add(&hex, &mut materials);
        commands.spawn((
            Mesh3d(meshes.add(mesh_data.into_mesh())),
            MeshMaterial3d(material),
            Transform::default(),
            FloorFill,
        ));
    }
    debug!(
        "Rebuilt level {} fills: {} features, {} triangles",
        floor,
        cache.passes.fill.len(),
        triangles
    );
}

#[cfg(test)]
mod tests {
    use floorplan::features::{Feature, FeatureTags};
    use floorplan::filter::LayerFilter;

    use super::*;

    fn room(level: &str, extra: &[(&str, &str)]) -> Feature {
        let mut properties = serde_json::Map::new();
        properties.insert("level".into(), level.into());
        for (k, v) in extra {
            properties.insert((*k).into(), (*v).into());
        }
        let o = MapProjection::default().origin();
        let ring = vec![
            o,
            LngLat::new(o.lng + 1e-4, o.lat),
            LngLat::new(o.lng + 1e-4, o.lat + 1e-4),
            LngLat::new(o.lng, o.lat + 1e-4),
            o,
        ];
        Feature::new(
            Some(Geometry::Polygon(vec![ring])),
            FeatureTags::from_properties(properties),
        )
    }

    fn filter(floor: i32) -> LayerFilter {
        LayerFilter {
            floor,
            amenity: None,
            show_service_paths: true,
            show_utilities: true,
        }
    }

    #[test]
    fn test_fills_group_by_colour() {
        let collection = FeatureCollection::new(vec![
            room("2", &[("amenity", "cafe")]),
            room("2", &[("amenity", "library")]),
            room("2", &[("utility", "power")]),
            room("3", &[]),
        ]);
        let passes = filter(2).split(&collection);
        let colors = ColorSettings::default();
        let groups = build_fill_meshes(
            &collection,
            &passes,
            2,
            &colors,
            &MapProjection::default(),
        );
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key(&colors.default));
        assert!(groups.contains_key(&colors.utilities));
        // Two rooms merged: 2 x (2 roof + 8 wall) triangles.
        assert_eq!(groups[&colors.default].triangle_count(), 20);
    }

    #[test]
    fn test_fills_sit_on_their_floor() {
        let collection = FeatureCollection::new(vec![room("4", &[])]);
        let passes = filter(4).split(&collection);
        let groups = build_fill_meshes(
            &collection,
            &passes,
            4,
            &ColorSettings::default(),
            &MapProjection::default(),
        );
        let data = groups.values().next().unwrap();
        let (min, max) = data
            .positions()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1])));
        assert_eq!(min, 20.0);
        assert_eq!(max, 23.0);
    }

    #[test]
    fn test_lines_and_points_are_not_extruded() {
        let mut line = room("1", &[]);
        line.geometry = Some(Geometry::LineString(vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 1.0),
        ]));
        let collection = FeatureCollection::new(vec![line]);
        let passes = filter(1).split(&collection);
        assert_eq!(passes.fill.len(), 1);
        let groups = build_fill_meshes(
            &collection,
            &passes,
            1,
            &ColorSettings::default(),
            &MapProjection::default(),
        );
        assert!(groups.is_empty());
    }
}
