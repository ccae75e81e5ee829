use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod features;
pub mod filter;
pub mod geometry;
pub mod level;
pub mod loading;
pub mod locations;
pub mod paint;
pub mod settings;
pub mod user_location;
pub mod view;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

use events::EventLog;
use loading::{FeatureData, FeatureFetchSlot, FeatureSource, FeaturesLoaded};
use settings::VisualSettings;
use view::{FloorState, LayerOptions, MapInteraction, PendingLocation};

/// Systems that settle the map state for the frame. Rendering and UI read
/// the state after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloorplanSet;

/// Run condition: the feature collection has loaded successfully.
pub fn features_ready(data: Res<FeatureData>) -> bool {
    data.is_ready()
}

/// Headless map state: feature loading, floors, layer filters, events and
/// the simulated user location.
pub struct FloorplanPlugin;

impl Plugin for FloorplanPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeatureSource>()
            .init_resource::<FeatureData>()
            .init_resource::<FeatureFetchSlot>()
            .init_resource::<FloorState>()
            .init_resource::<LayerOptions>()
            .init_resource::<MapInteraction>()
            .init_resource::<PendingLocation>()
            .init_resource::<VisualSettings>()
            .init_resource::<EventLog>()
            .add_event::<FeaturesLoaded>()
            .add_systems(Startup, loading::begin_feature_load)
            .add_systems(
                Update,
                (
                    loading::poll_feature_load,
                    loading::poll_feature_fetch,
                    view::apply_pending_location.run_if(features_ready),
                    view::sync_visibility_from_settings,
                    view::reset_amenity_on_floor_change,
                    view::clear_stale_event_selection,
                )
                    .chain()
                    .in_set(FloorplanSet),
            );
    }
}
