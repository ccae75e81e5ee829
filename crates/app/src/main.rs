use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

#[cfg(not(target_arch = "wasm32"))]
mod launch;
mod web_data;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Wayfinder".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    #[cfg(not(target_arch = "wasm32"))]
    launch::LaunchOptions::from_env().apply(&mut app);
    #[cfg(target_arch = "wasm32")]
    web_data::configure(&mut app);

    app.add_plugins((
        floorplan::FloorplanPlugin,
        storage::StoragePlugin,
        ui::UiPlugin,
        rendering::RenderingPlugin,
    ));

    app.run();
}
