//! Camera system
//!
//! Third-person orbit camera. `OrbitCamera` is plain state owned by the duel:
//! yaw and pitch accumulate from look input while the pointer is captured,
//! and the eye and look-at points chase their targets with a fixed lerp each
//! frame. `CameraPlugin` handles pointer capture and copies the result onto
//! the rendered camera.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_egui::EguiContexts;

use crate::duel::systems::DuelSystemPhase;
use crate::duel::Duel;
use crate::keybindings::{GameAction, Keybindings};
use crate::settings::GameSettings;

pub const DEFAULT_SENSITIVITY: f32 = 0.002;
pub const MIN_SENSITIVITY: f32 = 0.0005;
pub const MAX_SENSITIVITY: f32 = 0.005;

/// Clamp a look sensitivity into its legal range. Non-finite values fall back
/// to the default.
pub fn sanitize_sensitivity(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
    } else {
        DEFAULT_SENSITIVITY
    }
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Rotation about +Y, radians
    pub yaw: f32,
    /// Elevation above the horizon, radians
    pub pitch: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub distance: f32,
    pub height_offset: f32,
    pub look_at_offset: f32,
    pub position_lerp: f32,
    pub look_at_lerp: f32,
    /// Radians per pixel of pointer motion (horizontal, vertical)
    sensitivity: Vec2,
    position: Vec3,
    look_at: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            min_pitch: -0.3,
            max_pitch: 1.2,
            distance: 6.0,
            height_offset: 1.5,
            look_at_offset: 1.5,
            position_lerp: 0.2,
            look_at_lerp: 0.3,
            sensitivity: Vec2::splat(DEFAULT_SENSITIVITY),
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        }
    }
}

impl OrbitCamera {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    pub fn sensitivity(&self) -> Vec2 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, horizontal: f32, vertical: f32) {
        self.sensitivity = Vec2::new(
            sanitize_sensitivity(horizontal),
            sanitize_sensitivity(vertical),
        );
    }

    /// Accumulate a raw pointer delta. Ignored unless the pointer is captured.
    pub fn apply_look(&mut self, delta: Vec2, captured: bool) {
        if !captured || !delta.is_finite() {
            return;
        }
        self.yaw -= delta.x * self.sensitivity.x;
        self.pitch = (self.pitch - delta.y * self.sensitivity.y)
            .clamp(self.min_pitch, self.max_pitch);
    }

    /// Eye position the camera is heading for, on a sphere around `target`.
    pub fn target_position(&self, target: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        target
            + Vec3::new(
                self.distance * sin_yaw * cos_pitch,
                self.distance * sin_pitch + self.height_offset,
                self.distance * cos_yaw * cos_pitch,
            )
    }

    pub fn target_look_at(&self, target: Vec3) -> Vec3 {
        target + Vec3::Y * self.look_at_offset
    }

    /// Move one smoothing step toward the orbit around `target`.
    pub fn update(&mut self, target: Vec3) {
        self.position = self
            .position
            .lerp(self.target_position(target), self.position_lerp);
        self.look_at = self
            .look_at
            .lerp(self.target_look_at(target), self.look_at_lerp);
    }

    /// Jump straight to the orbit around `target`.
    pub fn snap_to(&mut self, target: Vec3) {
        self.position = self.target_position(target);
        self.look_at = self.target_look_at(target);
    }

    /// Camera-relative (forward, right) on the ground plane.
    pub fn movement_basis(&self) -> (Vec3, Vec3) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward = Vec3::new(-sin_yaw, 0.0, -cos_yaw);
        let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
        (forward, right)
    }
}

/// Marker component for the rendered 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Whether the pointer is locked to the window for mouse-look
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerCapture {
    pub captured: bool,
}

/// Plugin for camera management
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerCapture>().add_systems(
            Update,
            (
                handle_pointer_capture.before(DuelSystemPhase::Input),
                apply_look_sensitivity.before(DuelSystemPhase::Simulation),
                follow_orbit_camera.in_set(DuelSystemPhase::Presentation),
            ),
        );
    }
}

/// Left click captures the pointer; the release key gives it back.
fn handle_pointer_capture(
    mut capture: ResMut<PointerCapture>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut contexts: EguiContexts,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    // Use try_ctx_mut to gracefully handle window close
    let egui_wants_pointer = contexts
        .try_ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let release = keybindings.action_just_pressed(GameAction::ReleaseCursor, &keyboard)
        || !window.focused;
    let grab = mouse_button.just_pressed(MouseButton::Left) && !egui_wants_pointer;

    if capture.captured && release {
        capture.captured = false;
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    } else if !capture.captured && grab && window.focused {
        capture.captured = true;
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Push slider changes from the settings into the live camera.
fn apply_look_sensitivity(settings: Res<GameSettings>, duel: Option<ResMut<Duel>>) {
    let Some(mut duel) = duel else {
        return;
    };
    if !settings.is_changed() && !duel.is_added() {
        return;
    }
    duel.camera.set_sensitivity(
        settings.look_sensitivity.horizontal,
        settings.look_sensitivity.vertical,
    );
}

/// Copy the orbit camera state onto the rendered camera.
fn follow_orbit_camera(
    duel: Option<Res<Duel>>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(duel) = duel else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    camera_transform.translation = duel.camera.position();
    camera_transform.look_at(duel.camera.look_at(), Vec3::Y);
}
