//! Paint resolution: fill colour and extrusion height from a feature's tags.

mod resolve;


pub use resolve::{
    color_category, extrusion_for, relative_height, resolve_paint, Extrusion, FeaturePaint,
};
