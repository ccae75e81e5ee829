//! Feature data loading.
//!
//! On native builds the GeoJSON file is read and parsed on the
//! `IoTaskPool` and collected with `poll_once`. Browser builds cannot read
//! files, so the app crate fetches the document and drops the response text
//! into [`FeatureFetchSlot`], which is drained here.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task};

use crate::config::DEFAULT_DATA_PATH;
use crate::features::{FeatureCollection, FeatureLoadError};
use crate::level::FloorRegistry;
use crate::view::FloorState;

/// Where the feature collection comes from.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub enum FeatureSource {
    /// Read from disk on the IO pool.
    File(PathBuf),
    /// Fetched by the host (browser builds); delivered through
    /// [`FeatureFetchSlot`].
    Remote(String),
    /// Inserted directly with [`apply_load_result`]. Used by tests.
    Preloaded,
}

impl Default for FeatureSource {
    fn default() -> Self {
        FeatureSource::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

/// Progress of the single feature load.
#[derive(Resource, Debug, Default)]
pub enum FeatureData {
    #[default]
    Loading,
    Ready(FeatureCollection),
    /// Loading or parsing failed; holds a user-facing reason.
    Failed(String),
}

impl FeatureData {
    pub fn collection(&self) -> Option<&FeatureCollection> {
        match self {
            FeatureData::Ready(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeatureData::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FeatureData::Ready(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FeatureData::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Response text of a host-side fetch, written once by the fetcher.
#[derive(Resource, Clone, Default)]
pub struct FeatureFetchSlot(pub Arc<Mutex<Option<Result<String, String>>>>);

impl FeatureFetchSlot {
    /// Hand a finished fetch to the app. Later deliveries overwrite earlier
    /// undrained ones.
    pub fn deliver(&self, response: Result<String, String>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(response);
        }
    }
}

#[derive(Resource)]
pub struct PendingFeatureLoad {
    task: Task<Result<FeatureCollection, FeatureLoadError>>,
}

/// Fired once the feature data has settled, whichever way it went.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct FeaturesLoaded {
    pub feature_count: usize,
    pub floor_count: usize,
}

/// Kick off the load described by [`FeatureSource`].
pub fn begin_feature_load(mut commands: Commands, source: Res<FeatureSource>) {
    match &*source {
        FeatureSource::File(path) => {
            info!("Loading floor plan from {}", path.display());
            let path = path.clone();
            let task = IoTaskPool::get().spawn(async move { FeatureCollection::read_from_path(path) });
            commands.insert_resource(PendingFeatureLoad { task });
        }
        FeatureSource::Remote(url) => {
            info!("Waiting for floor plan fetch from {url}");
        }
        FeatureSource::Preloaded => {}
    }
}

/// Collect the IO task once it finishes.
pub fn poll_feature_load(
    mut commands: Commands,
    pending: Option<ResMut<PendingFeatureLoad>>,
    mut data: ResMut<FeatureData>,
    mut floors: ResMut<FloorState>,
    mut loaded: EventWriter<FeaturesLoaded>,
) {
    let Some(mut pending) = pending else {
        return;
    };
    let Some(result) = block_on(futures_lite::future::poll_once(&mut pending.task)) else {
        return;
    };
    commands.remove_resource::<PendingFeatureLoad>();
    loaded.send(apply_load_result(result, &mut data, &mut floors));
}

/// Drain a host-side fetch response, if one has arrived.
pub fn poll_feature_fetch(
    slot: Res<FeatureFetchSlot>,
    mut data: ResMut<FeatureData>,
    mut floors: ResMut<FloorState>,
    mut loaded: EventWriter<FeaturesLoaded>,
) {
    let response = match slot.0.lock() {
        Ok(mut guard) => guard.take(),
        Err(_) => return,
    };
    let Some(response) = response else {
        return;
    };
    let result = response
        .map_err(FeatureLoadError::Fetch)
        .and_then(|text| FeatureCollection::from_json_str(&text));
    loaded.send(apply_load_result(result, &mut data, &mut floors));
}

/// Settle the load: store the collection and rebuild the floor registry, or
/// record the failure.
pub fn apply_load_result(
    result: Result<FeatureCollection, FeatureLoadError>,
    data: &mut FeatureData,
    floors: &mut FloorState,
) -> FeaturesLoaded {
    match result {
        Ok(collection) => {
            let registry = FloorRegistry::from_collection(&collection);
            let summary = FeaturesLoaded {
                feature_count: collection.len(),
                floor_count: registry.len(),
            };
            match floors.replace_registry(registry) {
                Some(floor) => info!(
                    "Loaded {} features on {} floors, showing level {}",
                    summary.feature_count, summary.floor_count, floor
                ),
                None => warn!(
                    "Loaded {} features but none carry a usable level tag",
                    summary.feature_count
                ),
            }
            *data = FeatureData::Ready(collection);
            summary
        }
        Err(e) => {
            error!("Failed to load floor plan: {e}");
            floors.replace_registry(FloorRegistry::default());
            *data = FeatureData::Failed(e.to_string());
            FeaturesLoaded {
                feature_count: 0,
                floor_count: 0,
            }
        }
    }
}
