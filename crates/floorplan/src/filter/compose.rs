use std::collections::BTreeSet;

use crate::features::{Feature, FeatureCollection};

/// The UI state that decides which features are drawn, and on which pass.
///
/// Features are split over two passes: extruded fills, and thin lines for
/// service paths. Stairs and elevators always stay on the fill pass of their
/// floors since they carry the cross-floor context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerFilter {
    pub floor: i32,
    /// Only show features with this exact `amenity` value.
    pub amenity: Option<String>,
    pub show_service_paths: bool,
    pub show_utilities: bool,
}

impl LayerFilter {
    /// Whether `feature` belongs to the extruded fill pass.
    pub fn fill_matches(&self, feature: &Feature) -> bool {
        if !feature.is_on_floor(self.floor) {
            return false;
        }
        if feature.tags.is_stairs_or_elevator() {
            return true;
        }
        !feature.tags.is_service_path() && self.passes_user_filters(feature)
    }

    /// Whether `feature` belongs to the service-path line pass.
    pub fn line_matches(&self, feature: &Feature) -> bool {
        feature.is_on_floor(self.floor)
            && feature.tags.is_service_path()
            && self.show_service_paths
            && self.passes_user_filters(feature)
    }

    /// Amenity selection and utility visibility, shared by both passes.
    fn passes_user_filters(&self, feature: &Feature) -> bool {
        let amenity_ok = match &self.amenity {
            Some(wanted) => feature.tags.amenity.as_deref() == Some(wanted.as_str()),
            None => true,
        };
        amenity_ok && (self.show_utilities || !feature.tags.has_utility())
    }

    /// Split a collection into the two render passes, keeping indices into
    /// `collection.features`.
    pub fn split(&self, collection: &FeatureCollection) -> RenderPasses {
        let mut passes = RenderPasses::default();
        for (index, feature) in collection.features.iter().enumerate() {
            if self.fill_matches(feature) {
                passes.fill.push(index);
            } else if self.line_matches(feature) {
                passes.line.push(index);
            }
        }
        passes
    }
}

/// Feature indices selected for each render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPasses {
    pub fill: Vec<usize>,
    pub line: Vec<usize>,
}

impl RenderPasses {
    pub fn is_empty(&self) -> bool {
        self.fill.is_empty() && self.line.is_empty()
    }

    pub fn fill_features<'a>(
        &'a self,
        collection: &'a FeatureCollection,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.fill
            .iter()
            .filter_map(move |&index| collection.features.get(index))
    }

    pub fn line_features<'a>(
        &'a self,
        collection: &'a FeatureCollection,
    ) -> impl Iterator<Item = &'a Feature> + 'a {
        self.line
            .iter()
            .filter_map(move |&index| collection.features.get(index))
    }
}

/// Distinct amenity values on `floor`, sorted, for the amenity picker.
///
/// Only features whose `level` is exactly the floor number are considered,
/// so amenities on multi-floor spans are not offered.
pub fn amenities_on_floor(collection: &FeatureCollection, floor: i32) -> Vec<String> {
    let wanted = floor.to_string();
    collection
        .features
        .iter()
        .filter(|feature| feature.tags.level.as_deref() == Some(wanted.as_str()))
        .filter_map(|feature| feature.tags.amenity.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
