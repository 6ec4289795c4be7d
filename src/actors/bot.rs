//! Bot fighter
//!
//! Straight-line pursuit: face the target, close in until within two units,
//! and throw a punch whenever the decision cooldown allows and the target is
//! in reach.

use bevy::prelude::*;

use super::{heading_of, Body};
use crate::combat::log::CombatLog;
use crate::combat::vitals::DamageResult;
use crate::combat::weapon::{AttackOutcome, Weapon, WeaponKind};
use crate::combat::Combatant;
use crate::rig::GaitProfile;

pub const BOT_NAME: &str = "Bot";
pub const BOT_SPAWN: Vec3 = Vec3::new(-5.0, super::SPAWN_HEIGHT, 0.0);
pub const BOT_MAX_HEALTH: f32 = 100.0;
pub const BOT_MOVE_SPEED: f32 = 2.0;
/// Minimum time between two attack decisions, in milliseconds
pub const BOT_DECISION_COOLDOWN_MS: f64 = 1500.0;
/// The bot stops advancing once this close to its target
pub const BOT_APPROACH_DISTANCE: f32 = 2.0;

/// What the bot did this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BotDecision {
    pub moved: bool,
    /// Set when an attack was attempted, hit or miss
    pub attack: Option<AttackOutcome>,
}

#[derive(Debug, Clone)]
pub struct Bot {
    pub body: Body,
    pub weapon: Weapon,
    pub move_speed: f32,
    pub decision_cooldown_ms: f64,
    last_decision_time: f64,
}

impl Default for Bot {
    fn default() -> Self {
        Self {
            body: Body::new(BOT_NAME, BOT_MAX_HEALTH, BOT_SPAWN, GaitProfile::BOT),
            weapon: Weapon::new(WeaponKind::Fist),
            move_speed: BOT_MOVE_SPEED,
            decision_cooldown_ms: BOT_DECISION_COOLDOWN_MS,
            last_decision_time: 0.0,
        }
    }
}

impl Bot {
    pub fn last_decision_time(&self) -> f64 {
        self.last_decision_time
    }

    /// Run one frame of the bot's policy against `target`.
    pub fn decide<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        now: f64,
        dt: f32,
        log: &mut CombatLog,
    ) -> BotDecision {
        let mut decision = BotDecision::default();
        if !self.body.is_alive() || !target.is_alive() {
            return decision;
        }

        let offset = target.position() - self.body.position;
        let distance = offset.length();
        let direction = offset.normalize_or_zero();

        if direction != Vec3::ZERO {
            self.body.facing = heading_of(direction);
        }

        if distance > BOT_APPROACH_DISTANCE {
            self.body.position += direction * self.move_speed * dt;
            self.body.animate_walk(dt);
            decision.moved = true;
        } else {
            self.body.settle();
        }

        if now - self.last_decision_time >= self.decision_cooldown_ms
            && distance <= self.weapon.range()
        {
            self.last_decision_time = now;
            decision.attack = Some(self.weapon.attack(&self.body, target, now, log));
        }

        decision
    }
}

impl Combatant for Bot {
    fn name(&self) -> &str {
        self.body.name()
    }

    fn position(&self) -> Vec3 {
        self.body.position
    }

    fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    fn take_damage(&mut self, amount: f32) -> DamageResult {
        self.body.take_damage(amount)
    }
}
