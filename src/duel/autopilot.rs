//! Scripted player for headless duels
//!
//! Presses the same movement and attack keys a person would: walk toward the
//! bot until comfortably inside weapon reach, then swing whenever the
//! equipped weapon is ready.

use bevy::prelude::*;

use super::Duel;
use crate::combat::Combatant;
use crate::input::InputSnapshot;

/// How deep inside weapon reach the autopilot stops walking
const REACH_MARGIN: f32 = 0.8;

/// Minimum component along a camera axis before its key is pressed,
/// about cos(67.5°), so movement snaps to eight directions
const KEY_THRESHOLD: f32 = 0.38;

/// Whether the autopilot drives the player. Off leaves the player idle.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Autopilot {
    pub enabled: bool,
}

/// Keys the autopilot would press this frame.
pub fn plan_input(duel: &Duel) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    if duel.is_over() || !duel.player.is_alive() || !duel.bot.is_alive() {
        return input;
    }

    let weapon = duel.player.weapon();
    let mut offset = duel.bot.position() - duel.player.position();
    offset.y = 0.0;
    let distance = offset.length();

    if distance > weapon.range() * REACH_MARGIN {
        let direction = offset / distance;
        let (forward, right) = duel.camera.movement_basis();
        let along = direction.dot(forward);
        let across = direction.dot(right);
        input.forward = along > KEY_THRESHOLD;
        input.backward = along < -KEY_THRESHOLD;
        input.right = across > KEY_THRESHOLD;
        input.left = across < -KEY_THRESHOLD;
    }

    input.attack = distance <= weapon.range() && weapon.can_attack(duel.clock_ms());
    input
}

/// Fill the input snapshot from the autopilot.
pub fn drive_autopilot(
    autopilot: Res<Autopilot>,
    duel: Res<Duel>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    *snapshot = if autopilot.enabled {
        plan_input(&duel)
    } else {
        InputSnapshot::default()
    };
}
