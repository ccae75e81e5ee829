//! Hex colour strings from the visual settings, as Bevy colours.

use bevy::prelude::*;

/// Used when a stored colour string does not parse.
pub const FALLBACK_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

/// Parse `#rrggbb` / `#rgb` (with or without `#`). Bad input is logged and
/// yields [`FALLBACK_COLOR`].
pub fn hex_color(hex: &str) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => color.into(),
        Err(e) => {
            warn!("Invalid colour {:?}: {}", hex, e);
            FALLBACK_COLOR
        }
    }
}

/// Fill colour with the map's fill opacity applied.
pub fn fill_color(hex: &str, opacity: f32) -> Color {
    hex_color(hex).with_alpha(opacity)
}
