//! Fighters
//!
//! `Body` is the state every fighter shares: vitals, position, facing, and
//! the animated pose. `Player` and `Bot` wrap a body with their own weapon
//! handling and control logic.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::combat::vitals::{DamageResult, Vitals};
use crate::combat::Combatant;
use crate::rig::{walk, GaitProfile, Pose, WalkCycle};

pub mod bot;
pub mod player;

pub use bot::{Bot, BotDecision};
pub use player::Player;

/// Height of a fighter's root above the ground plane.
pub const SPAWN_HEIGHT: f32 = 2.55;

/// Shared physical and animation state of one fighter
#[derive(Debug, Clone)]
pub struct Body {
    pub vitals: Vitals,
    /// World position of the rig root. The single source of truth.
    pub position: Vec3,
    /// Rotation about +Y in radians; 0 faces +Z
    pub facing: f32,
    pub pose: Pose,
    pub walk: WalkCycle,
    pub gait: GaitProfile,
}

impl Body {
    pub fn new(name: &str, max_health: f32, position: Vec3, gait: GaitProfile) -> Self {
        Self {
            vitals: Vitals::new(name, max_health),
            position,
            facing: 0.0,
            pose: Pose::default(),
            walk: WalkCycle::default(),
            gait,
        }
    }

    pub fn animate_walk(&mut self, dt: f32) {
        self.walk.advance(dt, &self.gait, &mut self.pose);
    }

    pub fn settle(&mut self) {
        walk::settle(&mut self.pose);
    }

    /// Rotation of the rig root for rendering
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.facing)
    }
}

impl Combatant for Body {
    fn name(&self) -> &str {
        &self.vitals.name
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    fn take_damage(&mut self, amount: f32) -> DamageResult {
        self.vitals.take_damage(amount)
    }
}

/// Wrap an angle into `(-PI, PI]`. Non-finite input wraps to 0.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// Heading that faces along `direction` on the XZ plane.
pub fn heading_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Turn `current` toward `target` along the shortest arc.
///
/// `factor` is clamped to `[0, 1]`, so a single step never overshoots the
/// target or rotates more than PI.
pub fn turn_toward(current: f32, target: f32, factor: f32) -> f32 {
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    wrap_angle(current + wrap_angle(target - current) * factor)
}
