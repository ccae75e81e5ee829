use bevy::prelude::*;

use crate::config::DEFAULT_FLOOR;
use crate::events::MapEvent;
use crate::features::LngLat;
use crate::filter::LayerFilter;
use crate::level::FloorRegistry;
use crate::settings::VisibilitySettings;
use crate::user_location::UserLocation;

/// Available floors and the one on screen.
///
/// `current` starts at [`DEFAULT_FLOOR`] and is only ever moved onto a floor
/// present in the registry. When the registry is empty there is no active
/// floor and the view shows its "no floors" state.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct FloorState {
    registry: FloorRegistry,
    current: i32,
}

impl Default for FloorState {
    fn default() -> Self {
        Self {
            registry: FloorRegistry::default(),
            current: DEFAULT_FLOOR,
        }
    }
}

impl FloorState {
    pub fn registry(&self) -> &FloorRegistry {
        &self.registry
    }

    pub fn floors(&self) -> &[i32] {
        self.registry.floors()
    }

    /// The floor being shown, if any floor exists.
    pub fn active_floor(&self) -> Option<i32> {
        self.registry.contains(self.current).then_some(self.current)
    }

    pub fn has_floors(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Install a freshly computed registry, keeping the current floor when it
    /// is still available and dropping to the lowest floor otherwise.
    pub fn replace_registry(&mut self, registry: FloorRegistry) -> Option<i32> {
        if let Some(floor) = registry.reconcile(self.current) {
            self.current = floor;
        }
        self.registry = registry;
        self.active_floor()
    }

    /// Switch to `floor`. Ignored (returns `false`) for floors not in the
    /// registry.
    pub fn select(&mut self, floor: i32) -> bool {
        if !self.registry.contains(floor) {
            return false;
        }
        self.current = floor;
        true
    }

    pub fn step_up(&mut self) -> bool {
        match self.registry.above(self.current) {
            Some(floor) => self.select(floor),
            None => false,
        }
    }

    pub fn step_down(&mut self) -> bool {
        match self.registry.below(self.current) {
            Some(floor) => self.select(floor),
            None => false,
        }
    }
}

/// User-controlled layer filters of the map view.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct LayerOptions {
    /// `None` shows every amenity.
    pub amenity: Option<String>,
    pub show_service_paths: bool,
    pub show_utilities: bool,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self::from_visibility(&VisibilitySettings::default())
    }
}

impl LayerOptions {
    pub fn from_visibility(visibility: &VisibilitySettings) -> Self {
        Self {
            amenity: None,
            show_service_paths: visibility.show_service_paths,
            show_utilities: visibility.show_utilities,
        }
    }

    /// Take the toggles from new default visibility settings; the amenity
    /// selection is kept.
    pub fn sync_visibility(&mut self, visibility: &VisibilitySettings) {
        self.show_service_paths = visibility.show_service_paths;
        self.show_utilities = visibility.show_utilities;
    }

    pub fn layer_filter(&self, floor: i32) -> LayerFilter {
        LayerFilter {
            floor,
            amenity: self.amenity.clone(),
            show_service_paths: self.show_service_paths,
            show_utilities: self.show_utilities,
        }
    }
}

/// Name of the feature under the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
    pub name: String,
    pub position: LngLat,
}

/// Transient pointer and selection state of the map view.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct MapInteraction {
    pub hover: Option<HoverInfo>,
    /// Id of the event whose details are open.
    pub selected_event: Option<String>,
    pub user_location: Option<UserLocation>,
}

impl MapInteraction {
    /// Place the simulated user and move to their floor when it exists.
    pub fn place_user(&mut self, location: UserLocation, floors: &mut FloorState) {
        self.user_location = Some(location);
        floors.select(location.level);
    }

    pub fn clear_user_location(&mut self) {
        self.user_location = None;
    }

    /// Open an event's details and move to its floor when it exists.
    pub fn focus_event(&mut self, event: &MapEvent, floors: &mut FloorState) {
        floors.select(event.location.level);
        self.selected_event = Some(event.id.clone());
    }
}

/// A location payload waiting for the feature data to arrive, so the floor
/// switch can be validated against the loaded floors.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingLocation(pub Option<String>);
