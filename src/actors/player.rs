//! Player fighter
//!
//! Carries one weapon of every kind and swings whichever is equipped. Only
//! fist hits play the strike animation.

use bevy::prelude::*;

use super::{heading_of, turn_toward, Body};
use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::combat::vitals::DamageResult;
use crate::combat::weapon::{AttackOutcome, Weapon, WeaponKind};
use crate::combat::Combatant;
use crate::rig::{GaitProfile, StrikeAnimation};

pub const PLAYER_NAME: &str = "Player";
pub const PLAYER_SPAWN: Vec3 = Vec3::new(3.0, super::SPAWN_HEIGHT, 0.0);
pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_MOVE_SPEED: f32 = 8.0;
pub const PLAYER_ROTATION_SPEED: f32 = 8.0;

/// One weapon per kind, each with its own cooldown stamp
#[derive(Debug, Clone)]
pub struct Loadout {
    fist: Weapon,
    sword: Weapon,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            fist: Weapon::new(WeaponKind::Fist),
            sword: Weapon::new(WeaponKind::Sword),
        }
    }
}

impl Loadout {
    pub fn get(&self, kind: WeaponKind) -> &Weapon {
        match kind {
            WeaponKind::Fist => &self.fist,
            WeaponKind::Sword => &self.sword,
        }
    }

    pub fn get_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        match kind {
            WeaponKind::Fist => &mut self.fist,
            WeaponKind::Sword => &mut self.sword,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub loadout: Loadout,
    equipped: WeaponKind,
    pub strike: StrikeAnimation,
    pub move_speed: f32,
    pub rotation_speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(WeaponKind::Fist)
    }
}

impl Player {
    pub fn new(equipped: WeaponKind) -> Self {
        Self {
            body: Body::new(PLAYER_NAME, PLAYER_MAX_HEALTH, PLAYER_SPAWN, GaitProfile::PLAYER),
            loadout: Loadout::default(),
            equipped,
            strike: StrikeAnimation::default(),
            move_speed: PLAYER_MOVE_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
        }
    }

    pub fn equipped(&self) -> WeaponKind {
        self.equipped
    }

    pub fn weapon(&self) -> &Weapon {
        self.loadout.get(self.equipped)
    }

    /// Walk along `direction` (expected unit length) for `dt` seconds,
    /// turning toward the direction of travel.
    pub fn move_by(&mut self, direction: Vec3, dt: f32) {
        let movement = direction * self.move_speed * dt;
        self.body.position += movement;

        if movement.length_squared() > 0.0 {
            let target = heading_of(movement);
            self.body.facing =
                turn_toward(self.body.facing, target, self.rotation_speed * dt);
        }

        if !self.strike.is_playing() {
            self.body.animate_walk(dt);
        }
    }

    /// Ease the limbs back to rest. Held off while a strike plays.
    pub fn stop_walking(&mut self) {
        if !self.strike.is_playing() {
            self.body.settle();
        }
    }

    /// Equip `kind`. Returns false when it was already equipped.
    pub fn switch_weapon(&mut self, kind: WeaponKind, log: &mut CombatLog) -> bool {
        if kind == self.equipped {
            return false;
        }
        self.equipped = kind;
        info!("Switched to {}", kind.name());
        log.log(
            CombatLogEventType::WeaponSwitch,
            format!("{} switched to {}", self.body.vitals.name, kind.name()),
        );
        true
    }

    /// Swing the equipped weapon at `target`.
    pub fn attack<T: Combatant + ?Sized>(
        &mut self,
        target: &mut T,
        now: f64,
        log: &mut CombatLog,
    ) -> AttackOutcome {
        let weapon = self.loadout.get_mut(self.equipped);
        let outcome = weapon.attack(&self.body, target, now, log);

        if outcome.is_hit() && weapon.stats().animates_strike {
            self.strike.start(now);
        }
        outcome
    }

    /// Advance the strike animation.
    pub fn update(&mut self, now: f64) {
        self.strike.update(now, &mut self.body.pose);
    }
}

impl Combatant for Player {
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
