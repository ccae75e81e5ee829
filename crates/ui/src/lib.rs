use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use floorplan::FloorplanSet;

pub mod event_feed;
pub mod floor_panel;
pub mod places;
pub mod popups;
pub mod theme;

/// egui panels over the map. Expects `FloorplanPlugin` and `RenderingPlugin`.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        app.init_resource::<floor_panel::AmenityChoices>()
            .init_resource::<floor_panel::LocationEntry>()
            .init_resource::<places::PlaceIndex>()
            .init_resource::<places::PlaceSearch>()
            .add_systems(Startup, theme::apply_map_theme)
            .add_systems(
                Update,
                (
                    floor_panel::refresh_amenity_choices,
                    places::refresh_place_index,
                )
                    .after(FloorplanSet),
            )
            .add_systems(
                Update,
                (
                    floor_panel::floor_panel_ui,
                    event_feed::event_feed_ui,
                    places::places_ui,
                    popups::hover_label_ui,
                    popups::event_details_ui,
                    popups::user_location_ui,
                )
                    .chain()
                    .after(floor_panel::refresh_amenity_choices)
                    .after(places::refresh_place_index),
            );
    }
}
