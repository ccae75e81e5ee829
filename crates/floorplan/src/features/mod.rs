//! GeoJSON feature model: geometries, typed tags and collection parsing.
//!
//! Known tags get their own fields; everything else is kept as raw JSON so
//! nothing in the source data is lost.

mod error;
mod parse;
mod types;


pub use error::FeatureLoadError;
pub use types::{Feature, FeatureCollection, FeatureTags, Geometry, LngLat};
