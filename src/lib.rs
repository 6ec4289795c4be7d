//! Arena Duel - third-person melee duel against a bot
//!
//! One player-controlled fighter and one scripted bot meet on a flat arena.
//! Fighters walk, swing fists or a sword, and the first to fall decides the
//! duel.
//!
//! This library exposes the core game modules for testing and reuse.

pub mod actors;
pub mod camera;
pub mod cli;
pub mod combat;
pub mod duel;
pub mod headless;
pub mod input;
pub mod keybindings;
pub mod rig;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use combat::weapon::{AttackOutcome, WeaponKind};
pub use duel::{Duel, MatchOutcome, Side, TickReport};
pub use headless::{HeadlessMatchConfig, MatchResult};
pub use input::InputSnapshot;
