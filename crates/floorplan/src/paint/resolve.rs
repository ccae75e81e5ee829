use crate::config::{BENCH_RELATIVE_HEIGHT, DEFAULT_RELATIVE_HEIGHT, FLOOR_HEIGHT};
use crate::features::FeatureTags;
use crate::settings::{ColorCategory, ColorSettings};

/// Height and color of one feature on the fill pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturePaint<'a> {
    /// Extrusion height above the floor's base elevation.
    pub relative_height: f32,
    pub category: ColorCategory,
    pub color: &'a str,
}

/// Absolute vertical extent of an extruded feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extrusion {
    pub base: f32,
    pub top: f32,
}

/// Flat features (floor markings, corridors, stair wells, doors) get no
/// height; benches are low; everything else is a full room.
pub fn relative_height(tags: &FeatureTags) -> f32 {
    if tags.is_stairs_or_elevator() || tags.has_landuse() || tags.is_corridor() || tags.has_door()
    {
        0.0
    } else if tags.is_bench() {
        BENCH_RELATIVE_HEIGHT
    } else {
        DEFAULT_RELATIVE_HEIGHT
    }
}

/// First matching bucket wins: utility, landuse, corridor, stairs,
/// elevator, then the default.
pub fn color_category(tags: &FeatureTags) -> ColorCategory {
    if tags.has_utility() {
        ColorCategory::Utilities
    } else if tags.has_landuse() {
        ColorCategory::Landuse
    } else if tags.is_corridor() {
        ColorCategory::Corridor
    } else if tags.is_stairs() {
        ColorCategory::Stairs
    } else if tags.is_elevator() {
        ColorCategory::Elevator
    } else {
        ColorCategory::Default
    }
}

pub fn resolve_paint<'a>(tags: &FeatureTags, colors: &'a ColorSettings) -> FeaturePaint<'a> {
    let category = color_category(tags);
    FeaturePaint {
        relative_height: relative_height(tags),
        category,
        color: colors.get(category),
    }
}

/// Stack a feature's relative height on top of its floor's base elevation.
pub fn extrusion_for(floor: i32, relative_height: f32) -> Extrusion {
    let base = floor as f32 * FLOOR_HEIGHT;
    Extrusion {
        base,
        top: base + relative_height,
    }
}
