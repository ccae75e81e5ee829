use bevy_egui::{egui, EguiContexts};

/// Muted slate panels with a blue accent that matches the default room fill.
pub fn apply_map_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(30, 34, 44);
    let inactive = egui::Color32::from_rgb(46, 52, 66);
    let hover = egui::Color32::from_rgb(64, 76, 98);
    let active = ACCENT;

    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(24, 27, 36);
    style.visuals.faint_bg_color = egui::Color32::from_rgb(36, 40, 52);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let window_rounding = egui::CornerRadius::same(8);
    let widget_rounding = egui::CornerRadius::same(6);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);

    ctx.set_style(style);
}

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
pub const LIVE_BADGE: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(160, 166, 180);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

/// Small filled pill with white text.
pub fn badge(ui: &mut egui::Ui, text: &str, fill: egui::Color32) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .small()
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });
}
