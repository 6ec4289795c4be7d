//! Combat events
//!
//! Emitted by the duel systems after each tick so presentation code can
//! react without reaching into the simulation.

use bevy::prelude::*;

use super::weapon::{AttackOutcome, WeaponKind};
use crate::duel::{MatchOutcome, Side};

/// Event fired for every attack attempt, hit or miss
#[derive(Event, Debug, Clone)]
pub struct AttackResolvedEvent {
    /// Fighter that swung
    pub attacker: Side,
    /// Weapon used
    pub weapon: WeaponKind,
    pub outcome: AttackOutcome,
}

/// Event fired when the player changes weapon
#[derive(Event, Debug, Clone)]
pub struct WeaponSwitchedEvent {
    pub weapon: WeaponKind,
}

/// Event fired once, on the frame the duel is decided
#[derive(Event, Debug, Clone)]
pub struct DuelEndedEvent {
    pub outcome: MatchOutcome,
}
