//! Map popups: hover name next to the cursor, selected event details and
//! the "you are here" card.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floorplan::events::EventLog;
use floorplan::user_location::UserLocation;
use floorplan::view::{FloorState, MapInteraction};

use crate::event_feed::local_time_range;
use crate::floor_panel::floor_label;
use crate::theme;

/// Name of the room under the cursor, drawn just below-right of it.
pub fn hover_label_ui(mut contexts: EguiContexts, interaction: Res<MapInteraction>) {
    let Some(hover) = &interaction.hover else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let Some(pointer_pos) = ctx.pointer_hover_pos() else {
        return;
    };
    let label_pos = pointer_pos + egui::vec2(14.0, 18.0);

    egui::Area::new(egui::Id::new("hover_label"))
        .fixed_pos(label_pos)
        .interactable(false)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_rgba_premultiplied(20, 22, 30, 220))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(&hover.name).strong());
                });
        });
}

pub fn event_details_ui(
    mut contexts: EguiContexts,
    events: Res<EventLog>,
    mut interaction: ResMut<MapInteraction>,
) {
    let Some(event) = interaction
        .selected_event
        .as_deref()
        .and_then(|id| events.get(id))
    else {
        return;
    };

    let mut open = true;
    egui::Window::new(event.title.as_str())
        .id(egui::Id::new("event_details"))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .default_width(280.0)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
        .show(contexts.ctx_mut(), |ui| {
            if !event.description.is_empty() {
                ui.label(&event.description);
                ui.add_space(4.0);
            }
            ui.colored_label(theme::MUTED_TEXT, local_time_range(event));
            ui.label(floor_label(event.location.level));
        });

    if !open {
        interaction.selected_event = None;
    }
}

/// What the location card offers for `location` given the loaded floors.
pub fn can_jump_to(location: &UserLocation, floors: &FloorState) -> bool {
    floors.registry().contains(location.level) && floors.active_floor() != Some(location.level)
}

pub fn user_location_ui(
    mut contexts: EguiContexts,
    mut floors: ResMut<FloorState>,
    mut interaction: ResMut<MapInteraction>,
) {
    let Some(location) = interaction.user_location else {
        return;
    };

    let mut go_to_level = false;
    let mut clear = false;
    egui::Window::new("You are here")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-8.0, -8.0))
        .resizable(false)
        .collapsible(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(floor_label(location.level));
            ui.colored_label(
                theme::MUTED_TEXT,
                format!("{:.5}, {:.5}", location.latitude, location.longitude),
            );
            if !floors.registry().contains(location.level) {
                ui.colored_label(theme::ERROR_TEXT, "This level is not on the map");
            }
            ui.horizontal(|ui| {
                let enabled = can_jump_to(&location, &floors);
                go_to_level = ui
                    .add_enabled(enabled, egui::Button::new("Go to Level"))
                    .clicked();
                clear = ui.button("Clear").clicked();
            });
        });

    if go_to_level {
        floors.select(location.level);
    }
    if clear {
        interaction.clear_user_location();
    }
}
