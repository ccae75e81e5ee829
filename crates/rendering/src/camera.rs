use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::egui_input_guard::egui_wants_pointer;

const PAN_SPEED: f32 = 150.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 15.0;
const MAX_DISTANCE: f32 = 1500.0;
const MIN_PITCH: f32 = 10.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Keeps the focus near the campus.
const FOCUS_LIMIT: f32 = 3000.0;
const LEFT_DRAG_THRESHOLD: f32 = 5.0;

/// Orbital camera model: camera orbits around a focus point on the ground.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at. Its height follows the active floor.
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    /// A pitched 3D view of the map origin.
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 50.0_f32.to_radians(),
            distance: 350.0,
        }
    }
}

impl OrbitCamera {
    /// Camera position and look-at target.
    pub fn eye_and_target(&self) -> (Vec3, Vec3) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        (self.focus + Vec3::new(x, y, z), self.focus)
    }

    /// Pan by a screen-space delta, rotated into the ground plane by `yaw`.
    pub fn pan_screen(&mut self, delta: Vec2) {
        let scale = self.distance / 1000.0;
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus.x += (-delta.x * cos_yaw - delta.y * sin_yaw) * scale;
        self.focus.z += (delta.x * sin_yaw - delta.y * cos_yaw) * scale;
        self.clamp_focus();
    }

    pub fn zoom(&mut self, steps: f32) {
        let factor = 1.0 - steps * ZOOM_SPEED;
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw += delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Centre the view on a ground point, keeping the current height.
    pub fn look_at_ground(&mut self, ground: Vec2) {
        self.focus.x = ground.x;
        self.focus.z = ground.y;
        self.clamp_focus();
    }

    fn clamp_focus(&mut self) {
        self.focus.x = self.focus.x.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
        self.focus.z = self.focus.z.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

/// Tracks left-click drag state: differentiates click from drag.
/// Past `LEFT_DRAG_THRESHOLD` pixels the press becomes a camera pan and
/// no longer counts as a map click.
#[derive(Resource, Default)]
pub struct LeftClickDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    pub is_dragging: bool,
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let (eye, target) = orbit.eye_and_target();

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(target, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

/// Keep the focus height on the active floor so orbiting pivots around it.
pub fn follow_active_floor(
    floors: Res<floorplan::view::FloorState>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !floors.is_changed() {
        return;
    }
    let height = floors.active_floor().map_or(0.0, |floor| {
        floorplan::paint::extrusion_for(floor, 0.0).base
    });
    if orbit.focus.y != height {
        orbit.focus.y = height;
    }
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (eye, target) = orbit.eye_and_target();
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
}

/// WASD/Arrow keys: pan focus along the ground plane.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x -= 1.0;
    }
    if dir != Vec2::ZERO {
        // Screen-drag convention: dragging right moves the view left.
        let pixels = PAN_SPEED * 1000.0 / orbit.distance.max(1.0) * time.delta_secs();
        orbit.pan_screen(dir.normalize() * pixels);
    }
}

/// Right-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }
    if buttons.just_released(MouseButton::Right) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            orbit.orbit(pos - drag.last_pos);
            drag.last_pos = pos;
        }
    }
}

/// Left-mouse drag: pan focus (with threshold to distinguish from clicks).
pub fn camera_left_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    mut left_drag: ResMut<LeftClickDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        if let Some(pos) = window.cursor_position() {
            left_drag.pressed = true;
            left_drag.start_pos = pos;
            left_drag.last_pos = pos;
            left_drag.is_dragging = false;
        }
    }
    if buttons.just_released(MouseButton::Left) {
        left_drag.pressed = false;
    }

    if left_drag.pressed {
        if let Some(pos) = window.cursor_position() {
            if !left_drag.is_dragging
                && (pos - left_drag.start_pos).length() > LEFT_DRAG_THRESHOLD
            {
                left_drag.is_dragging = true;
            }
            if left_drag.is_dragging {
                orbit.pan_screen(pos - left_drag.last_pos);
                left_drag.last_pos = pos;
            }
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitCamera>,
) {
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        orbit.zoom(dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_pitched() {
        let orbit = OrbitCamera::default();
        let (eye, target) = orbit.eye_and_target();
        assert_eq!(target, Vec3::ZERO);
        assert!(eye.y > 0.0);
        assert!((eye.distance(target) - orbit.distance).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..100 {
            orbit.zoom(3.0);
        }
        assert_eq!(orbit.distance, MIN_DISTANCE);
        for _ in 0..100 {
            orbit.zoom(-3.0);
        }
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_orbit_pitch_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.orbit(Vec2::new(0.0, 10_000.0));
        assert_eq!(orbit.pitch, MIN_PITCH);
        orbit.orbit(Vec2::new(0.0, -10_000.0));
        assert_eq!(orbit.pitch, MAX_PITCH);
    }

    #[test]
    fn test_look_at_ground_keeps_height() {
        let mut orbit = OrbitCamera::default();
        orbit.focus.y = 30.0;
        orbit.look_at_ground(Vec2::new(12.0, -8.0));
        assert_eq!(orbit.focus, Vec3::new(12.0, 30.0, -8.0));
        orbit.look_at_ground(Vec2::new(1e6, 0.0));
        assert_eq!(orbit.focus.x, FOCUS_LIMIT);
    }
}
