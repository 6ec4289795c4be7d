//! Combat system
//!
//! Implements the core combat mechanics including:
//! - Weapons (damage, cooldown, range)
//! - Health, death, and health-bar state
//! - Combat logging

use bevy::prelude::*;

pub mod events;
pub mod log;
pub mod vitals;
pub mod weapon;

use events::*;
use vitals::DamageResult;

/// Anything that can be hit by a weapon.
pub trait Combatant {
    fn name(&self) -> &str;
    fn position(&self) -> Vec3;
    fn is_alive(&self) -> bool;
    /// Apply damage and report how much actually landed.
    fn take_damage(&mut self, amount: f32) -> DamageResult;
}

/// Plugin for the combat system
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Combat events
            .add_event::<AttackResolvedEvent>()
            .add_event::<WeaponSwitchedEvent>()
            .add_event::<DuelEndedEvent>()
            // Resources
            .init_resource::<log::CombatLog>()
            .add_systems(Update, announce_duel_end);
    }
}

/// Log the final result once the duel latches.
fn announce_duel_end(mut ended: EventReader<DuelEndedEvent>) {
    for event in ended.read() {
        info!(
            "Duel over: {} ({:?} wins)",
            event.outcome.banner(),
            event.outcome.winner()
        );
    }
}
