//! Named places extracted from the feature collection, used for the
//! "places on this level" list and as event locations.

use crate::config::DEFAULT_FLOOR;
use crate::features::{FeatureCollection, LngLat};
use crate::geometry::centroid;

/// Broad kind of a named place, from the first tag present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Amenity,
    Highway,
    Utility,
    Landuse,
    Other,
}

impl LocationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Amenity => "amenity",
            Self::Highway => "highway",
            Self::Utility => "utility",
            Self::Landuse => "landuse",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedLocation {
    /// `"{feature index}-{name}"`, unique within one collection.
    pub id: String,
    pub name: String,
    /// The raw `level` tag.
    pub level: String,
    /// Floor used when placing something at this location.
    pub floor: i32,
    pub kind: LocationKind,
    pub position: LngLat,
}

/// Floor a location is anchored to: the start of a range, the value of a
/// single level, or [`DEFAULT_FLOOR`] when the start does not parse.
pub fn anchor_floor(level: &str) -> i32 {
    let start = level.split('-').next().unwrap_or_default();
    start.trim().parse().unwrap_or(DEFAULT_FLOOR)
}

/// Every feature with both a name and a level, sorted by name.
///
/// Features without a usable geometry are skipped since there is nowhere to
/// put them on the map.
pub fn index_locations(collection: &FeatureCollection) -> Vec<NamedLocation> {
    let mut locations: Vec<NamedLocation> = collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            let name = feature.tags.name.as_deref().filter(|n| !n.is_empty())?;
            let level = feature.tags.level.as_deref().filter(|l| !l.is_empty())?;
            let position = feature.geometry.as_ref().and_then(centroid)?;

            let tags = &feature.tags;
            let kind = if tags.amenity.is_some() {
                LocationKind::Amenity
            } else if tags.highway.is_some() {
                LocationKind::Highway
            } else if tags.utility.is_some() {
                LocationKind::Utility
            } else if tags.landuse.is_some() {
                LocationKind::Landuse
            } else {
                LocationKind::Other
            };

            Some(NamedLocation {
                id: format!("{index}-{name}"),
                name: name.to_string(),
                level: level.to_string(),
                floor: anchor_floor(level),
                kind,
                position,
            })
        })
        .collect();

    locations.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    locations
}

/// Locations whose level span covers `floor`.
pub fn locations_on_floor(locations: &[NamedLocation], floor: i32) -> Vec<&NamedLocation> {
    locations
        .iter()
        .filter(|location| crate::level::parse_level(&location.level).contains(floor))
        .collect()
}
