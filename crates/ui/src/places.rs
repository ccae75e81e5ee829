//! "Places on this level": the named locations of the active floor, with a
//! text filter. Clicking a place centres the camera on it.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floorplan::loading::FeatureData;
use floorplan::locations::{index_locations, locations_on_floor, NamedLocation};
use floorplan::view::FloorState;
use rendering::camera::OrbitCamera;
use rendering::projection::MapProjection;

use crate::theme;

/// Named locations of the loaded collection, sorted by name.
#[derive(Resource, Default, Debug)]
pub struct PlaceIndex(pub Vec<NamedLocation>);

pub fn refresh_place_index(data: Res<FeatureData>, mut index: ResMut<PlaceIndex>) {
    if !data.is_changed() {
        return;
    }
    index.0 = data.collection().map(index_locations).unwrap_or_default();
    debug!("Indexed {} named places", index.0.len());
}

#[derive(Resource, Default)]
pub struct PlaceSearch(pub String);

/// Places on `floor` whose name contains `query`, ignoring case.
pub fn matching_places<'a>(
    places: &'a [NamedLocation],
    floor: i32,
    query: &str,
) -> Vec<&'a NamedLocation> {
    let query = query.trim().to_lowercase();
    locations_on_floor(places, floor)
        .into_iter()
        .filter(|place| query.is_empty() || place.name.to_lowercase().contains(&query))
        .collect()
}

pub fn places_ui(
    mut contexts: EguiContexts,
    index: Res<PlaceIndex>,
    floors: Res<FloorState>,
    mut search: ResMut<PlaceSearch>,
    mut orbit: ResMut<OrbitCamera>,
    projection: Res<MapProjection>,
) {
    let Some(floor) = floors.active_floor() else {
        return;
    };
    if index.0.is_empty() {
        return;
    }

    let mut picked: Option<&NamedLocation> = None;
    egui::Window::new("Places")
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(236.0, -8.0))
        .default_open(false)
        .resizable(false)
        .default_width(240.0)
        .show(contexts.ctx_mut(), |ui| {
            let mut query = search.0.clone();
            ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search this level")
                    .desired_width(f32::INFINITY),
            );
            if query != search.0 {
                search.0 = query;
            }

            let places = matching_places(&index.0, floor, &search.0);
            if places.is_empty() {
                ui.colored_label(theme::MUTED_TEXT, "No places found");
                return;
            }
            egui::ScrollArea::vertical()
                .id_salt("places_list")
                .max_height(260.0)
                .show(ui, |ui| {
                    for place in places {
                        ui.horizontal(|ui| {
                            if ui.link(&place.name).clicked() {
                                picked = Some(place);
                            }
                            ui.colored_label(theme::MUTED_TEXT, place.kind.label());
                        });
                    }
                });
        });

    if let Some(place) = picked {
        orbit.look_at_ground(projection.to_ground(place.position));
    }
}

#[cfg(test)]
mod tests {
    use floorplan::features::LngLat;
    use floorplan::locations::LocationKind;

    use super::*;

    fn place(name: &str, level: &str) -> NamedLocation {
        NamedLocation {
            id: format!("0-{name}"),
            name: name.to_string(),
            level: level.to_string(),
            floor: 1,
            kind: LocationKind::Amenity,
            position: LngLat::new(103.7695, 1.3067),
        }
    }

    #[test]
    fn test_matching_places_filters_floor_and_name() {
        let places = vec![
            place("Cafe Nero", "1"),
            place("Lecture Hall", "1-3"),
            place("Library", "2"),
        ];
        let names = |found: Vec<&NamedLocation>| {
            found.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        };

        assert_eq!(
            names(matching_places(&places, 2, "")),
            ["Lecture Hall", "Library"]
        );
        assert_eq!(names(matching_places(&places, 1, " CAFE ")), ["Cafe Nero"]);
        assert!(matching_places(&places, 5, "").is_empty());
    }
}
