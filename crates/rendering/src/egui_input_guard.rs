//! Keeps pointer input over egui panels from reaching the map, so dragging a
//! panel or clicking a floor button never pans the camera or picks a room.

use bevy_egui::EguiContexts;

/// `true` when the cursor is over an egui area or egui is handling a
/// drag/click. Map input systems early-return when this is `true`.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}
