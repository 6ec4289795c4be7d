//! Weapons
//!
//! Weapons are plain data records picked from a closed set of kinds. Each
//! owned `Weapon` carries its own cooldown stamp; range and cooldown are
//! checked on every swing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::log::CombatLog;
use super::Combatant;

/// Every weapon a fighter can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Fist,
    Sword,
}

/// Fixed stats of a weapon kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub damage: f32,
    /// Minimum time between two hits, in milliseconds
    pub cooldown_ms: f64,
    /// Maximum reach (inclusive), in world units
    pub range: f32,
    /// Whether a hit plays the arm-swing strike animation
    pub animates_strike: bool,
}

const FIST: WeaponStats = WeaponStats {
    name: "Fist",
    damage: 5.0,
    cooldown_ms: 500.0,
    range: 2.5,
    animates_strike: true,
};

// Sword hits do not play the strike animation.
const SWORD: WeaponStats = WeaponStats {
    name: "Sword",
    damage: 15.0,
    cooldown_ms: 1200.0,
    range: 3.5,
    animates_strike: false,
};

impl WeaponKind {
    pub fn all() -> &'static [WeaponKind] {
        &[WeaponKind::Fist, WeaponKind::Sword]
    }

    pub fn stats(&self) -> &'static WeaponStats {
        match self {
            WeaponKind::Fist => &FIST,
            WeaponKind::Sword => &SWORD,
        }
    }

    pub fn name(&self) -> &'static str {
        self.stats().name
    }

    /// Parse a weapon name as written in config files. Case-insensitive.
    pub fn parse(name: &str) -> Result<WeaponKind, String> {
        WeaponKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                let valid: Vec<&str> = WeaponKind::all().iter().map(|k| k.name()).collect();
                format!(
                    "Unknown weapon: '{}'. Valid weapons: {}",
                    name,
                    valid.join(", ")
                )
            })
    }
}

/// Result of an attack attempt. Misses are control flow, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// The weapon connected; `damage` is what the target actually lost
    Hit { damage: f32, killed: bool },
    /// Still cooling down from the previous hit
    Cooldown,
    /// Target too far away
    OutOfRange { distance: f32 },
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }

    /// Short reason tag for misses
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            AttackOutcome::Hit { .. } => None,
            AttackOutcome::Cooldown => Some("cooldown"),
            AttackOutcome::OutOfRange { .. } => Some("out_of_range"),
        }
    }
}

/// A weapon owned by one fighter
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    /// Time of the last hit in ms; `None` until the first hit lands
    last_attack_time: Option<f64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            last_attack_time: None,
        }
    }

    pub fn stats(&self) -> &'static WeaponStats {
        self.kind.stats()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn range(&self) -> f32 {
        self.stats().range
    }

    pub fn last_attack_time(&self) -> Option<f64> {
        self.last_attack_time
    }

    pub fn can_attack(&self, now: f64) -> bool {
        match self.last_attack_time {
            Some(last) => now - last >= self.stats().cooldown_ms,
            None => true,
        }
    }

    /// Swing at `target`.
    ///
    /// Cooldown is checked before range. Only a hit consumes the cooldown,
    /// damages the target, and writes to the combat log.
    pub fn attack<A, T>(
        &mut self,
        attacker: &A,
        target: &mut T,
        now: f64,
        log: &mut CombatLog,
    ) -> AttackOutcome
    where
        A: Combatant + ?Sized,
        T: Combatant + ?Sized,
    {
        if !self.can_attack(now) {
            return AttackOutcome::Cooldown;
        }

        let distance = attacker.position().distance(target.position());
        if distance > self.stats().range {
            return AttackOutcome::OutOfRange { distance };
        }

        self.last_attack_time = Some(now);
        let result = target.take_damage(self.stats().damage);

        log.log_hit(attacker.name(), target.name(), self.name(), result.applied);
        if result.killed {
            log.log_death(target.name(), attacker.name());
        }

        AttackOutcome::Hit {
            damage: result.applied,
            killed: result.killed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::vitals::{DamageResult, Vitals};

    struct Dummy {
        vitals: Vitals,
        position: Vec3,
    }

    impl Dummy {
        fn at(name: &str, x: f32) -> Self {
            Self {
                vitals: Vitals::new(name, 100.0),
                position: Vec3::new(x, 0.0, 0.0),
            }
        }
    }

    impl Combatant for Dummy {
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

    #[test]
    fn test_weapon_stats() {
        let fist = WeaponKind::Fist.stats();
        assert_eq!((fist.damage, fist.cooldown_ms, fist.range), (5.0, 500.0, 2.5));
        let sword = WeaponKind::Sword.stats();
        assert_eq!((sword.damage, sword.cooldown_ms, sword.range), (15.0, 1200.0, 3.5));
        assert!(fist.animates_strike);
        assert!(!sword.animates_strike);
    }

    #[test]
    fn test_hit_at_exact_range() {
        let attacker = Dummy::at("Player", 0.0);
        let mut target = Dummy::at("Bot", 2.5);
        let mut fist = Weapon::new(WeaponKind::Fist);
        let mut log = CombatLog::default();

        let outcome = fist.attack(&attacker, &mut target, 1000.0, &mut log);
        assert_eq!(outcome, AttackOutcome::Hit { damage: 5.0, killed: false });
        assert_eq!(fist.last_attack_time(), Some(1000.0));
        assert_eq!(target.vitals.health(), 95.0);
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_out_of_range_reports_distance_and_keeps_cooldown() {
        let attacker = Dummy::at("Player", 0.0);
        let mut target = Dummy::at("Bot", 4.0);
        let mut fist = Weapon::new(WeaponKind::Fist);
        let mut log = CombatLog::default();

        let outcome = fist.attack(&attacker, &mut target, 1000.0, &mut log);
        assert_eq!(outcome, AttackOutcome::OutOfRange { distance: 4.0 });
        assert_eq!(outcome.reason(), Some("out_of_range"));
        assert_eq!(fist.last_attack_time(), None);
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_cooldown_checked_before_range() {
        let attacker = Dummy::at("Player", 0.0);
        let mut near = Dummy::at("Bot", 1.0);
        let mut far = Dummy::at("Far", 50.0);
        let mut sword = Weapon::new(WeaponKind::Sword);
        let mut log = CombatLog::default();

        assert!(sword.attack(&attacker, &mut near, 0.0, &mut log).is_hit());
        assert_eq!(sword.attack(&attacker, &mut far, 600.0, &mut log), AttackOutcome::Cooldown);
        assert_eq!(sword.attack(&attacker, &mut near, 1199.0, &mut log), AttackOutcome::Cooldown);
        assert_eq!(sword.last_attack_time(), Some(0.0));
        assert!(sword.attack(&attacker, &mut near, 1200.0, &mut log).is_hit());
        assert_eq!(sword.last_attack_time(), Some(1200.0));
    }

    #[test]
    fn test_killing_blow_logs_death_once() {
        let attacker = Dummy::at("Player", 0.0);
        let mut target = Dummy::at("Bot", 1.0);
        target.vitals.take_damage(90.0);
        let mut sword = Weapon::new(WeaponKind::Sword);
        let mut log = CombatLog::default();

        let outcome = sword.attack(&attacker, &mut target, 0.0, &mut log);
        assert_eq!(outcome, AttackOutcome::Hit { damage: 10.0, killed: true });

        let outcome = sword.attack(&attacker, &mut target, 5000.0, &mut log);
        assert_eq!(outcome, AttackOutcome::Hit { damage: 0.0, killed: false });
        assert_eq!(
            log.filter_by_type(crate::combat::log::CombatLogEventType::Death).len(),
            1
        );
    }

    #[test]
    fn test_parse_weapon_names() {
        assert_eq!(WeaponKind::parse("Fist"), Ok(WeaponKind::Fist));
        assert_eq!(WeaponKind::parse("sword"), Ok(WeaponKind::Sword));
        assert_eq!(WeaponKind::parse(" SWORD "), Ok(WeaponKind::Sword));
        let err = WeaponKind::parse("Axe").unwrap_err();
        assert!(err.contains("Fist, Sword"), "{}", err);
    }
}
