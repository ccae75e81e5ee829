use std::collections::BTreeSet;

use crate::features::FeatureCollection;

use super::LevelSpan;

/// Sorted, de-duplicated list of every floor referenced by the loaded
/// features.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorRegistry {
    floors: Vec<i32>,
}

impl FloorRegistry {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        Self::from_spans(collection.features.iter().map(|feature| feature.floors()))
    }

    pub fn from_spans(spans: impl IntoIterator<Item = LevelSpan>) -> Self {
        let mut unique = BTreeSet::new();
        for span in spans {
            unique.extend(span.iter());
        }
        Self {
            floors: unique.into_iter().collect(),
        }
    }

    /// Floors in ascending order.
    pub fn floors(&self) -> &[i32] {
        &self.floors
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn contains(&self, floor: i32) -> bool {
        self.floors.binary_search(&floor).is_ok()
    }

    pub fn lowest(&self) -> Option<i32> {
        self.floors.first().copied()
    }

    pub fn highest(&self) -> Option<i32> {
        self.floors.last().copied()
    }

    /// The floor to show after this registry replaces an older one.
    ///
    /// Keeps `current` when it is still available, otherwise falls back to
    /// the lowest floor. `None` when there are no floors at all.
    pub fn reconcile(&self, current: i32) -> Option<i32> {
        if self.contains(current) {
            Some(current)
        } else {
            self.lowest()
        }
    }

    /// Next floor above `current`, if any.
    pub fn above(&self, current: i32) -> Option<i32> {
        self.floors.iter().copied().find(|&floor| floor > current)
    }

    /// Next floor below `current`, if any.
    pub fn below(&self, current: i32) -> Option<i32> {
        self.floors.iter().rev().copied().find(|&floor| floor < current)
    }
}
