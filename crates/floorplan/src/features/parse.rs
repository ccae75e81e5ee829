use std::path::Path;

use bevy::log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::FeatureLoadError;
use super::types::{Feature, FeatureCollection, FeatureTags, Geometry};

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

impl FeatureCollection {
    /// Parse a GeoJSON-like feature collection.
    ///
    /// Geometries of an unsupported type (or missing ones) are dropped but
    /// the feature is kept, so its tags still contribute floors.
    pub fn from_json_str(text: &str) -> Result<Self, FeatureLoadError> {
        let raw: RawCollection = serde_json::from_str(text)?;

        let mut unsupported = 0usize;
        let features = raw
            .features
            .into_iter()
            .map(|raw| {
                let geometry = raw.geometry.and_then(|value| {
                    if value.is_null() {
                        return None;
                    }
                    match serde_json::from_value::<Geometry>(value) {
                        Ok(geometry) => Some(geometry),
                        Err(_) => {
                            unsupported += 1;
                            None
                        }
                    }
                });
                let tags = FeatureTags::from_properties(raw.properties.unwrap_or_default());
                Feature::new(geometry, tags)
            })
            .collect::<Vec<_>>();

        if unsupported > 0 {
            debug!(
                "Dropped {} unsupported geometries out of {} features",
                unsupported,
                features.len()
            );
        }

        Ok(FeatureCollection::new(features))
    }

    /// Read and parse a feature collection file.
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Self, FeatureLoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
