//! Which features are drawn on the active floor, split into the extruded
//! fill pass and the service-path line pass.

mod compose;


pub use compose::{amenities_on_floor, LayerFilter, RenderPasses};
