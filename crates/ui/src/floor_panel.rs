//! Left-hand map controls: floor selector, amenity filter, layer toggles and
//! the location entry box.
//!
//! While the feature collection is loading, or when it failed or contains no
//! floors, the panel shows a status message instead of the controls.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use floorplan::filter::amenities_on_floor;
use floorplan::loading::FeatureData;
use floorplan::view::{FloorState, LayerOptions, PendingLocation};

use crate::theme;

pub const NO_DATA_MESSAGE: &str = "No data found. Please check your connection and try again.";
pub const NO_FLOORS_MESSAGE: &str = "No floors found in this floor plan.";

/// What the panel can show for the current load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Loading,
    NoData,
    NoFloors,
    Ready,
}

pub fn panel_status(data: &FeatureData, floors: &FloorState) -> PanelStatus {
    if data.is_loading() {
        PanelStatus::Loading
    } else if !data.is_ready() {
        PanelStatus::NoData
    } else if !floors.has_floors() {
        PanelStatus::NoFloors
    } else {
        PanelStatus::Ready
    }
}

pub fn floor_label(floor: i32) -> String {
    format!("Level {floor}")
}

/// Amenities offered for the active floor, rebuilt when the floor or the
/// data changes.
#[derive(Resource, Default, Debug)]
pub struct AmenityChoices {
    pub floor: Option<i32>,
    pub amenities: Vec<String>,
}

pub fn refresh_amenity_choices(
    data: Res<FeatureData>,
    floors: Res<FloorState>,
    mut choices: ResMut<AmenityChoices>,
) {
    if !(data.is_changed() || floors.is_changed()) {
        return;
    }
    let floor = floors.active_floor();
    let amenities = match (data.collection(), floor) {
        (Some(collection), Some(floor)) => amenities_on_floor(collection, floor),
        _ => Vec::new(),
    };
    if choices.floor != floor || choices.amenities != amenities {
        choices.floor = floor;
        choices.amenities = amenities;
    }
}

/// Text typed into the location box, kept across frames.
#[derive(Resource, Default)]
pub struct LocationEntry(pub String);

#[allow(clippy::too_many_arguments)]
pub fn floor_panel_ui(
    mut contexts: EguiContexts,
    data: Res<FeatureData>,
    mut floors: ResMut<FloorState>,
    mut options: ResMut<LayerOptions>,
    choices: Res<AmenityChoices>,
    mut entry: ResMut<LocationEntry>,
    mut pending: ResMut<PendingLocation>,
    time: Res<Time>,
) {
    let status = panel_status(&data, &floors);
    egui::SidePanel::left("floor_panel")
        .resizable(false)
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Wayfinder");
            ui.separator();

            match status {
                PanelStatus::Loading => {
                    let dots = ".".repeat(1 + (time.elapsed_secs() * 2.5) as usize % 3);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading floor plan{dots}"));
                    });
                    return;
                }
                PanelStatus::NoData => {
                    ui.colored_label(theme::ERROR_TEXT, NO_DATA_MESSAGE);
                    return;
                }
                PanelStatus::NoFloors => {
                    ui.label(NO_FLOORS_MESSAGE);
                    return;
                }
                PanelStatus::Ready => {}
            }

            floor_selector(ui, &mut floors);
            ui.separator();
            amenity_filter(ui, &choices, &mut options);
            ui.separator();
            layer_toggles(ui, &mut options);
            ui.separator();
            location_entry(ui, &mut entry, &mut pending);
        });
}

fn floor_selector(ui: &mut egui::Ui, floors: &mut ResMut<FloorState>) {
    let Some(active) = floors.active_floor() else {
        return;
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Floor").strong());
        theme::badge(ui, &floor_label(active), theme::ACCENT);
    });

    ui.horizontal(|ui| {
        let below = floors.registry().below(active).is_some();
        let above = floors.registry().above(active).is_some();
        if ui.add_enabled(below, egui::Button::new("Down")).clicked() {
            floors.step_down();
        }
        if ui.add_enabled(above, egui::Button::new("Up")).clicked() {
            floors.step_up();
        }
    });

    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for &floor in floors.floors() {
            if ui
                .selectable_label(floor == active, floor.to_string())
                .on_hover_text(floor_label(floor))
                .clicked()
                && floor != active
            {
                picked = Some(floor);
            }
        }
    });
    if let Some(floor) = picked {
        floors.select(floor);
    }
}

fn amenity_filter(ui: &mut egui::Ui, choices: &AmenityChoices, options: &mut ResMut<LayerOptions>) {
    ui.label(egui::RichText::new("Amenities").strong());
    if choices.amenities.is_empty() {
        ui.colored_label(theme::MUTED_TEXT, "None on this level");
        return;
    }

    let current = options.amenity.clone();
    let mut next = current.clone();
    egui::ScrollArea::vertical()
        .id_salt("amenity_list")
        .max_height(180.0)
        .show(ui, |ui| {
            if ui.radio(next.is_none(), "Show all").clicked() {
                next = None;
            }
            for amenity in &choices.amenities {
                let selected = next.as_deref() == Some(amenity.as_str());
                if ui.radio(selected, amenity).clicked() {
                    next = Some(amenity.clone());
                }
            }
        });
    if next != current {
        options.amenity = next;
    }
}

fn layer_toggles(ui: &mut egui::Ui, options: &mut ResMut<LayerOptions>) {
    ui.label(egui::RichText::new("Layers").strong());
    let mut service_paths = options.show_service_paths;
    let mut utilities = options.show_utilities;
    ui.checkbox(&mut service_paths, "Service paths");
    ui.checkbox(&mut utilities, "Utilities");
    if service_paths != options.show_service_paths {
        options.show_service_paths = service_paths;
    }
    if utilities != options.show_utilities {
        options.show_utilities = utilities;
    }
}

fn location_entry(
    ui: &mut egui::Ui,
    entry: &mut ResMut<LocationEntry>,
    pending: &mut ResMut<PendingLocation>,
) {
    ui.label(egui::RichText::new("My location").strong());
    let response = ui.add(
        egui::TextEdit::singleline(&mut entry.0)
            .hint_text("lat,lng,level")
            .desired_width(f32::INFINITY),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    let has_text = !entry.0.trim().is_empty();
    if (ui.add_enabled(has_text, egui::Button::new("Set location")).clicked() || submitted)
        && has_text
    {
        pending.0 = Some(std::mem::take(&mut entry.0));
    }
}
