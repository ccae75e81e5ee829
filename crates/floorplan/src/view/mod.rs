//! State of the map view: active floor, layer options, hover, selection and
//! the simulated user location, plus the systems that keep them consistent.

mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use state::{FloorState, HoverInfo, LayerOptions, MapInteraction, PendingLocation};
pub use systems::{
    apply_pending_location, clear_stale_event_selection, reset_amenity_on_floor_change,
    sync_visibility_from_settings,
};
