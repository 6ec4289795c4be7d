//! Per-frame input snapshot
//!
//! The duel never reads devices. Once per frame a sampler (the keyboard and
//! mouse in a windowed session, the autopilot when headless) fills an
//! `InputSnapshot`, and the tick consumes it.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::camera::PointerCapture;
use crate::combat::weapon::WeaponKind;
use crate::keybindings::{GameAction, Keybindings};

/// Everything the player asked for this frame
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Attack key went down this frame
    pub attack: bool,
    /// Weapon key went down this frame
    pub equip: Option<WeaponKind>,
    /// Raw pointer motion since the last frame, in pixels
    pub look_delta: Vec2,
    pub pointer_captured: bool,
}

impl InputSnapshot {
    /// Movement direction on the ground plane for the given camera basis.
    /// Zero when no movement key is held or opposite keys cancel.
    pub fn move_direction(&self, forward: Vec3, right: Vec3) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.forward {
            direction += forward;
        }
        if self.backward {
            direction -= forward;
        }
        if self.right {
            direction += right;
        }
        if self.left {
            direction -= right;
        }
        direction.normalize_or_zero()
    }

    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Read keyboard, mouse, and pointer capture into the snapshot.
pub fn sample_input(
    mut snapshot: ResMut<InputSnapshot>,
    keyboard: Res<ButtonInput<KeyCode>>,
    keybindings: Res<Keybindings>,
    capture: Res<PointerCapture>,
    mut mouse_motion: EventReader<MouseMotion>,
) {
    let look_delta = mouse_motion
        .read()
        .map(|motion| motion.delta)
        .filter(|delta| delta.is_finite())
        .sum::<Vec2>();

    let equip = if keybindings.action_just_pressed(GameAction::EquipFist, &keyboard) {
        Some(WeaponKind::Fist)
    } else if keybindings.action_just_pressed(GameAction::EquipSword, &keyboard) {
        Some(WeaponKind::Sword)
    } else {
        None
    };

    *snapshot = InputSnapshot {
        forward: keybindings.action_pressed(GameAction::MoveForward, &keyboard),
        backward: keybindings.action_pressed(GameAction::MoveBackward, &keyboard),
        left: keybindings.action_pressed(GameAction::MoveLeft, &keyboard),
        right: keybindings.action_pressed(GameAction::MoveRight, &keyboard),
        attack: keybindings.action_just_pressed(GameAction::Attack, &keyboard),
        equip,
        look_delta,
        pointer_captured: capture.captured,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_is_normalized() {
        let input = InputSnapshot {
            forward: true,
            right: true,
            ..default()
        };
        let direction = input.move_direction(Vec3::NEG_Z, Vec3::X);
        assert!((direction.length() - 1.0).abs() < 1e-6);
        assert!(direction.x > 0.0 && direction.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputSnapshot {
            forward: true,
            backward: true,
            ..default()
        };
        assert!(input.is_moving());
        assert_eq!(input.move_direction(Vec3::NEG_Z, Vec3::X), Vec3::ZERO);
    }

    #[test]
    fn test_sampler_reads_bound_keys() {
        let mut app = App::new();
        app.add_event::<MouseMotion>()
            .init_resource::<InputSnapshot>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Keybindings>()
            .insert_resource(PointerCapture { captured: true })
            .add_systems(Update, sample_input);

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::KeyW);
            keyboard.press(KeyCode::Digit2);
        }
        app.world_mut().send_event(MouseMotion { delta: Vec2::new(3.0, -1.0) });
        app.world_mut().send_event(MouseMotion { delta: Vec2::new(2.0, 0.0) });
        app.update();

        let snapshot = app.world().resource::<InputSnapshot>();
        assert!(snapshot.forward);
        assert!(!snapshot.attack);
        assert_eq!(snapshot.equip, Some(WeaponKind::Sword));
        assert_eq!(snapshot.look_delta, Vec2::new(5.0, -1.0));
        assert!(snapshot.pointer_captured);
    }
}
