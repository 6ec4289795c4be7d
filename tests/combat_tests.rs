//! Integration tests for weapons, damage, and the combat log
//!
//! These tests verify that:
//! - Weapons respect cooldown and range, and only hits consume the cooldown
//! - Death happens exactly once and is logged exactly once
//! - A full fist fight through the duel records every hit

use arenaduel::actors::Body;
use arenaduel::combat::log::{CombatLog, CombatLogEventType};
use arenaduel::combat::weapon::{AttackOutcome, Weapon, WeaponKind};
use arenaduel::combat::Combatant;
use arenaduel::rig::GaitProfile;
use arenaduel::{Duel, InputSnapshot, MatchOutcome};
use bevy::math::Vec3;

fn body_at(name: &str, x: f32) -> Body {
    Body::new(name, 100.0, Vec3::new(x, 0.0, 0.0), GaitProfile::PLAYER)
}

// =============================================================================
// Weapon Contract
// =============================================================================

#[test]
fn test_first_swing_is_never_on_cooldown() {
    let attacker = body_at("Player", 0.0);
    let mut target = body_at("Bot", 1.0);
    let mut log = CombatLog::default();
    let mut fist = Weapon::new(WeaponKind::Fist);

    assert_eq!(fist.last_attack_time(), None);
    let outcome = fist.attack(&attacker, &mut target, 0.0, &mut log);
    assert_eq!(outcome, AttackOutcome::Hit { damage: 5.0, killed: false });
    assert_eq!(target.vitals.health(), 95.0);
}

#[test]
fn test_cooldown_boundary_is_inclusive() {
    let attacker = body_at("Player", 0.0);
    let mut target = body_at("Bot", 1.0);
    let mut log = CombatLog::default();
    let mut sword = Weapon::new(WeaponKind::Sword);

    assert!(sword.attack(&attacker, &mut target, 100.0, &mut log).is_hit());
    assert_eq!(
        sword.attack(&attacker, &mut target, 1299.0, &mut log),
        AttackOutcome::Cooldown
    );
    assert!(sword.attack(&attacker, &mut target, 1300.0, &mut log).is_hit());
    assert_eq!(target.vitals.health(), 70.0);
}

#[test]
fn test_range_boundary_is_inclusive() {
    let attacker = body_at("Player", 0.0);
    let mut log = CombatLog::default();

    let mut edge = body_at("Bot", 3.5);
    assert!(Weapon::new(WeaponKind::Sword)
        .attack(&attacker, &mut edge, 0.0, &mut log)
        .is_hit());

    let mut beyond = body_at("Bot", 2.6);
    let mut fist = Weapon::new(WeaponKind::Fist);
    match fist.attack(&attacker, &mut beyond, 0.0, &mut log) {
        AttackOutcome::OutOfRange { distance } => assert!((distance - 2.6).abs() < 1e-5),
        other => panic!("expected OutOfRange, got {:?}", other),
    }
    // A miss does not start the cooldown
    assert_eq!(fist.last_attack_time(), None);
    assert_eq!(beyond.vitals.health(), 100.0);
}

#[test]
fn test_misses_are_not_logged() {
    let attacker = body_at("Player", 0.0);
    let mut target = body_at("Bot", 10.0);
    let mut log = CombatLog::default();
    Weapon::new(WeaponKind::Fist).attack(&attacker, &mut target, 0.0, &mut log);
    assert!(log.entries.is_empty());
}

// =============================================================================
// Death
// =============================================================================

#[test]
fn test_death_transition_happens_once() {
    let mut body = body_at("Bot", 0.0);

    let first = body.take_damage(150.0);
    assert!(first.killed);
    assert_eq!(first.applied, 100.0);
    assert!(!body.is_alive());
    assert_eq!(body.vitals.health(), 0.0);

    let second = body.take_damage(10.0);
    assert!(!second.killed);
    assert_eq!(second.applied, 0.0);
}

#[test]
fn test_twenty_fist_hits_win_the_duel() {
    let mut duel = Duel::default();
    let mut log = CombatLog::default();
    duel.begin(&mut log);

    // Stand inside fist reach but outside the bot's approach distance
    duel.player.body.position = duel.bot.body.position + Vec3::new(1.5, 0.0, 0.0);
    let input = InputSnapshot {
        attack: true,
        ..Default::default()
    };

    let mut finished = Vec::new();
    for _ in 0..2000 {
        if let Some(outcome) = duel.tick(&input, 0.016, &mut log).finished {
            finished.push(outcome);
        }
    }

    assert_eq!(finished, vec![MatchOutcome::Victory]);
    assert_eq!(duel.outcome(), Some(MatchOutcome::Victory));
    assert_eq!(log.hits_by("Player").len(), 20);
    assert_eq!(log.total_damage_by("Player"), 100.0);
    assert_eq!(log.filter_by_type(CombatLogEventType::Death).len(), 1);
    assert!(duel.player.is_alive());

    // The bot got some swings in before going down
    assert!(!log.hits_by("Bot").is_empty());
    assert_eq!(
        duel.player.body.vitals.health(),
        100.0 - log.total_damage_by("Bot")
    );
}
