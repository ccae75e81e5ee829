//! Live event feed: upcoming and running events with a jump to their
//! marker on the map.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use chrono::{DateTime, Local, TimeZone, Utc};

use floorplan::events::{EventLog, MapEvent};
use floorplan::view::{FloorState, MapInteraction};
use rendering::camera::OrbitCamera;
use rendering::markers::event_ground;
use rendering::projection::MapProjection;

use crate::floor_panel::floor_label;
use crate::theme;

/// `"Mon 14 Oct, 09:00 - 11:30"`, or both dates spelled out when the event
/// runs past midnight in `tz`.
pub fn format_time_range<Tz: TimeZone>(start: DateTime<Utc>, end: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let start = start.with_timezone(tz);
    let end = end.with_timezone(tz);
    if start.date_naive() == end.date_naive() {
        format!("{} - {}", start.format("%a %-d %b, %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%a %-d %b, %H:%M"),
            end.format("%a %-d %b, %H:%M")
        )
    }
}

pub fn local_time_range(event: &MapEvent) -> String {
    format_time_range(event.start_time, event.end_time, &Local)
}

pub fn event_feed_ui(
    mut contexts: EguiContexts,
    events: Res<EventLog>,
    mut floors: ResMut<FloorState>,
    mut interaction: ResMut<MapInteraction>,
    mut orbit: ResMut<OrbitCamera>,
    projection: Res<MapProjection>,
) {
    let now = Utc::now();
    let feed = events.live_feed(now);
    let mut focused: Option<&MapEvent> = None;

    egui::Window::new("Live Events")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
        .resizable(false)
        .collapsible(true)
        .default_width(260.0)
        .show(contexts.ctx_mut(), |ui| {
            if feed.is_empty() {
                ui.colored_label(theme::MUTED_TEXT, "No upcoming events");
                return;
            }
            for (i, event) in feed.iter().enumerate() {
                if i > 0 {
                    ui.separator();
                }
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&event.title).strong());
                    if event.is_happening(now) {
                        theme::badge(ui, "Happening Now", theme::LIVE_BADGE);
                    }
                });
                ui.colored_label(theme::MUTED_TEXT, local_time_range(event));
                ui.horizontal(|ui| {
                    ui.label(floor_label(event.location.level));
                    if ui.small_button("View on Map").clicked() {
                        focused = Some(*event);
                    }
                });
            }
        });

    if let Some(event) = focused {
        interaction.focus_event(event, &mut floors);
        orbit.look_at_ground(event_ground(event, &projection));
    }
}
