//! Floor levels: parsing of `level` tags (`"6"`, `"6-12"`) and the sorted
//! registry of floors available for navigation.

mod parse;
mod registry;

#[cfg(test)]
mod tests;

pub use parse::{parse_level, LevelSpan};
pub use registry::FloorRegistry;
