//! Startup switches read once from the environment.
//!
//! - `WAYFINDER_DATA`: path of the GeoJSON feature collection.
//! - `WAYFINDER_LOCATION`: a location payload (`lat,lng[,level]` or JSON),
//!   applied as soon as the floors are known.
//!
//! The storage switches (`WAYFINDER_USER`, `WAYFINDER_STORAGE_DIR`) are read
//! by the storage crate.

use std::path::PathBuf;

use bevy::prelude::*;

use floorplan::loading::FeatureSource;
use floorplan::view::PendingLocation;

pub const DATA_ENV: &str = "WAYFINDER_DATA";
pub const LOCATION_ENV: &str = "WAYFINDER_LOCATION";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    pub data: Option<PathBuf>,
    pub location: Option<String>,
}

impl LaunchOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            data: get(DATA_ENV).map(PathBuf::from),
            location: get(LOCATION_ENV),
        }
    }

    pub fn apply(self, app: &mut App) {
        if let Some(path) = self.data {
            info!("Using floor plan from {}={}", DATA_ENV, path.display());
            app.insert_resource(FeatureSource::File(path));
        }
        if let Some(payload) = self.location {
            app.insert_resource(PendingLocation(Some(payload)));
        }
    }
}
