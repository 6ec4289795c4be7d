//! Health and lifecycle
//!
//! Every fighter carries a `Vitals` record. Death is a one-way transition:
//! once health reaches zero the fighter stays dead for the rest of the session.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Colour band of a health bar, chosen from the remaining health fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// More than half health left
    Green,
    /// More than a quarter left
    Yellow,
    /// A quarter or less
    Red,
}

impl HealthBand {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            HealthBand::Green
        } else if fraction > 0.25 {
            HealthBand::Yellow
        } else {
            HealthBand::Red
        }
    }

    /// Hex colour used for the bar fill.
    pub fn hex(&self) -> u32 {
        match self {
            HealthBand::Green => 0x00ff00,
            HealthBand::Yellow => 0xffff00,
            HealthBand::Red => 0xff0000,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            HealthBand::Green => Color::srgb(0.0, 1.0, 0.0),
            HealthBand::Yellow => Color::srgb(1.0, 1.0, 0.0),
            HealthBand::Red => Color::srgb(1.0, 0.0, 0.0),
        }
    }
}

/// Visual state of the health bar floating above a fighter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBarState {
    /// Fill scale along the bar, `health / max_health`
    pub fraction: f32,
    pub band: HealthBand,
}

impl HealthBarState {
    pub fn full() -> Self {
        Self {
            fraction: 1.0,
            band: HealthBand::Green,
        }
    }
}

/// Result of a single damage application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    /// Damage actually removed from health (never more than the health left)
    pub applied: f32,
    /// True only on the call that moved the fighter from alive to dead
    pub killed: bool,
}

impl DamageResult {
    pub const NONE: DamageResult = DamageResult {
        applied: 0.0,
        killed: false,
    };
}

/// Health pool of a fighter.
#[derive(Debug, Clone)]
pub struct Vitals {
    pub name: String,
    pub max_health: f32,
    health: f32,
    alive: bool,
    health_bar: HealthBarState,
}

impl Vitals {
    pub fn new(name: impl Into<String>, max_health: f32) -> Self {
        debug_assert!(max_health > 0.0, "max_health must be positive");
        Self {
            name: name.into(),
            max_health,
            health: max_health,
            alive: true,
            health_bar: HealthBarState::full(),
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health_fraction(&self) -> f32 {
        self.health / self.max_health
    }

    pub fn health_bar(&self) -> HealthBarState {
        self.health_bar
    }

    /// Remove up to `amount` health.
    ///
    /// Dead fighters take no damage. The health bar is resynchronised after
    /// every call, including no-op ones.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        if !self.alive {
            self.sync_health_bar();
            return DamageResult::NONE;
        }

        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        let applied = amount.min(self.health);
        self.health -= applied;

        let mut killed = false;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            killed = true;
            info!("[{}] has been defeated!", self.name);
        }

        self.sync_health_bar();
        DamageResult { applied, killed }
    }

    fn sync_health_bar(&mut self) {
        let fraction = self.health_fraction().clamp(0.0, 1.0);
        self.health_bar = HealthBarState {
            fraction,
            band: HealthBand::from_fraction(fraction),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_never_drops_below_zero() {
        for amount in [0.0, 1.0, 37.5, 100.0, 250.0, 1.0e9] {
            let mut vitals = Vitals::new("Bot", 100.0);
            let before = vitals.health();
            let result = vitals.take_damage(amount);
            assert!(vitals.health() >= 0.0);
            assert_eq!(result.applied, amount.min(before));
        }
    }

    #[test]
    fn test_overkill_reports_remaining_health() {
        let mut vitals = Vitals::new("Bot", 100.0);
        vitals.take_damage(97.0);
        let result = vitals.take_damage(15.0);
        assert_eq!(result.applied, 3.0);
        assert!(result.killed);
        assert!(!vitals.is_alive());
    }

    #[test]
    fn test_dead_fighter_ignores_damage() {
        let mut vitals = Vitals::new("Player", 10.0);
        assert!(vitals.take_damage(10.0).killed);
        assert_eq!(vitals.take_damage(5.0), DamageResult::NONE);
        assert_eq!(vitals.health(), 0.0);
    }

    #[test]
    fn test_death_fires_once_under_repeated_zero_damage() {
        let mut vitals = Vitals::new("Bot", 5.0);
        let first = vitals.take_damage(5.0);
        let second = vitals.take_damage(0.0);
        let third = vitals.take_damage(0.0);
        assert!(first.killed);
        assert!(!second.killed);
        assert!(!third.killed);
    }

    #[test]
    fn test_negative_and_nan_damage_are_ignored() {
        let mut vitals = Vitals::new("Bot", 100.0);
        assert_eq!(vitals.take_damage(-20.0).applied, 0.0);
        assert_eq!(vitals.take_damage(f32::NAN).applied, 0.0);
        assert_eq!(vitals.health(), 100.0);
    }

    #[test]
    fn test_health_bar_bands() {
        let mut vitals = Vitals::new("Bot", 100.0);
        assert_eq!(vitals.health_bar().band, HealthBand::Green);

        vitals.take_damage(50.0);
        assert_eq!(vitals.health_bar().band, HealthBand::Yellow);
        assert_eq!(vitals.health_bar().fraction, 0.5);

        vitals.take_damage(25.0);
        assert_eq!(vitals.health_bar().band, HealthBand::Red);

        vitals.take_damage(100.0);
        assert_eq!(vitals.health_bar().fraction, 0.0);
        assert_eq!(vitals.health_bar().band, HealthBand::Red);
    }

    #[test]
    fn test_band_hex_values() {
        assert_eq!(HealthBand::Green.hex(), 0x00ff00);
        assert_eq!(HealthBand::Yellow.hex(), 0xffff00);
        assert_eq!(HealthBand::Red.hex(), 0xff0000);
    }
}
