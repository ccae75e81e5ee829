//! # TestMap: headless harness for floor plan integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + [`FloorplanPlugin`] and a
//! builder for feature data, so tests can drive the map state exactly the
//! way the rendering and UI crates do.

use std::path::PathBuf;

use bevy::app::App;
use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::events::{EventLocation, EventLog, NewMapEvent};
use crate::features::{Feature, FeatureCollection, FeatureTags, Geometry, LngLat};
use crate::loading::{apply_load_result, FeatureData, FeatureFetchSlot, FeatureSource};
use crate::settings::{SettingsPatch, VisualSettings};
use crate::view::{FloorState, LayerOptions, MapInteraction, PendingLocation};
use crate::FloorplanPlugin;

/// A headless Bevy App wrapping `FloorplanPlugin`.
pub struct TestMap {
    app: App,
    features: Vec<Feature>,
}

impl Default for TestMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMap {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An app with no feature data; nothing is loaded until [`Self::load`].
    pub fn new() -> Self {
        Self::with_source(FeatureSource::Preloaded)
    }

    /// An app that loads from `source` on its first update.
    pub fn with_source(source: FeatureSource) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(source);
        app.add_plugins(FloorplanPlugin);
        Self {
            app,
            features: Vec::new(),
        }
    }

    /// An app that reads the GeoJSON document at `path` on the IO pool.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_source(FeatureSource::File(path.into()))
    }

    // -----------------------------------------------------------------------
    // Feature builders
    // -----------------------------------------------------------------------

    /// Queue a feature with the given tags and a unit square polygon.
    pub fn with_room(mut self, tags: &[(&str, &str)]) -> Self {
        let origin = LngLat::new(103.7695, 1.3067);
        let ring = vec![
            origin,
            LngLat::new(origin.lng + 1e-4, origin.lat),
            LngLat::new(origin.lng + 1e-4, origin.lat + 1e-4),
            LngLat::new(origin.lng, origin.lat + 1e-4),
            origin,
        ];
        self.features.push(Feature::new(
            Some(Geometry::Polygon(vec![ring])),
            tags_from(tags),
        ));
        self
    }

    /// Queue a line feature (for service paths).
    pub fn with_path(mut self, tags: &[(&str, &str)]) -> Self {
        let line = vec![LngLat::new(103.7695, 1.3067), LngLat::new(103.7697, 1.3068)];
        self.features
            .push(Feature::new(Some(Geometry::LineString(line)), tags_from(tags)));
        self
    }

    /// Deliver the queued features as a successful load and run one update.
    pub fn load(mut self) -> Self {
        let collection = FeatureCollection::new(std::mem::take(&mut self.features));
        self.load_result(Ok(collection));
        self
    }

    /// Feed a load outcome straight into the app state.
    pub fn load_result(
        &mut self,
        result: Result<FeatureCollection, crate::features::FeatureLoadError>,
    ) {
        let world = self.app.world_mut();
        world.resource_scope(|world, mut data: Mut<FeatureData>| {
            let mut floors = world.resource_mut::<FloorState>();
            apply_load_result(result, &mut data, &mut floors);
        });
        self.update();
    }

    /// Hand a fetch response to the app, as the browser bridge does.
    pub fn deliver_fetch(&mut self, response: Result<String, String>) {
        self.app.world().resource::<FeatureFetchSlot>().deliver(response);
    }

    /// Queue a scanned location payload.
    pub fn scan_location(&mut self, payload: &str) {
        self.app.world_mut().resource_mut::<PendingLocation>().0 = Some(payload.to_string());
    }

    /// Add an event on `level`, spanning `start..end`. Returns its id.
    pub fn add_event(
        &mut self,
        title: &str,
        level: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> String {
        let event = NewMapEvent {
            title: title.to_string(),
            description: String::new(),
            location: EventLocation {
                latitude: 1.3067,
                longitude: 103.7695,
                level,
            },
            start_time: start,
            end_time: end,
        };
        self.app
            .world_mut()
            .resource_mut::<EventLog>()
            .add(event, start)
    }

    pub fn apply_settings(&mut self, patch: &SettingsPatch) -> bool {
        self.app
            .world_mut()
            .resource_mut::<VisualSettings>()
            .apply(patch)
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run updates until the feature load settles or `max_updates` pass.
    /// Yields between updates so the IO pool can make progress.
    pub fn update_until_loaded(&mut self, max_updates: u32) -> bool {
        for _ in 0..max_updates {
            self.app.update();
            if !self.data().is_loading() {
                return true;
            }
            std::thread::yield_now();
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        false
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn data(&self) -> &FeatureData {
        self.app.world().resource::<FeatureData>()
    }

    pub fn floors(&self) -> &FloorState {
        self.app.world().resource::<FloorState>()
    }

    pub fn floors_mut(&mut self) -> Mut<'_, FloorState> {
        self.app.world_mut().resource_mut::<FloorState>()
    }

    pub fn options(&self) -> &LayerOptions {
        self.app.world().resource::<LayerOptions>()
    }

    pub fn options_mut(&mut self) -> Mut<'_, LayerOptions> {
        self.app.world_mut().resource_mut::<LayerOptions>()
    }

    pub fn interaction(&self) -> &MapInteraction {
        self.app.world().resource::<MapInteraction>()
    }

    pub fn interaction_mut(&mut self) -> Mut<'_, MapInteraction> {
        self.app.world_mut().resource_mut::<MapInteraction>()
    }

    pub fn events_mut(&mut self) -> Mut<'_, EventLog> {
        self.app.world_mut().resource_mut::<EventLog>()
    }
}

fn tags_from(pairs: &[(&str, &str)]) -> FeatureTags {
    let properties = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    FeatureTags::from_properties(properties)
}
