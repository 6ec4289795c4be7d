//! Duel orchestration
//!
//! `Duel` owns both fighters and the camera and advances them one frame at a
//! time from an `InputSnapshot`. It is a plain struct (also a Bevy resource),
//! so the whole frame can be driven from tests without an app.
//!
//! ## Frame order
//!
//! 1. Stop here once the duel is decided; the clock freezes with it
//! 2. Sanitise the frame delta and advance the duel clock
//! 3. Look input, weapon switch, attack key
//! 4. Player movement relative to the camera, then the strike animation
//! 5. Bot decision
//! 6. Camera smoothing
//! 7. Terminal check (player death first, then bot death)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub mod autopilot;
pub mod constants;
pub mod models;
pub mod plugin;
pub mod scene;
pub mod systems;

use crate::actors::{Body, Bot, Player};
use crate::camera::OrbitCamera;
use crate::combat::log::{CombatLog, CombatLogEventType, CombatantMetadata, MatchMetadata};
use crate::combat::weapon::{AttackOutcome, WeaponKind};
use crate::combat::Combatant;
use crate::input::InputSnapshot;
use constants::MAX_FRAME_DELTA;

pub use plugin::DuelPlugin;

/// Which fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Bot,
}

/// How a decided duel ended, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    Defeat,
}

impl MatchOutcome {
    pub fn banner(&self) -> &'static str {
        match self {
            MatchOutcome::Victory => "VICTORY",
            MatchOutcome::Defeat => "DEFEAT",
        }
    }

    pub fn winner(&self) -> Side {
        match self {
            MatchOutcome::Victory => Side::Player,
            MatchOutcome::Defeat => Side::Bot,
        }
    }
}

/// Clamp a raw frame delta to `[0, MAX_FRAME_DELTA]`; garbage becomes 0.
pub fn sanitize_frame_delta(raw_dt: f32) -> f32 {
    if raw_dt.is_finite() && raw_dt > 0.0 {
        raw_dt.min(MAX_FRAME_DELTA)
    } else {
        0.0
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Result of the attack key, if it was pressed
    pub player_attack: Option<AttackOutcome>,
    pub bot_attack: SmallVec<[AttackOutcome; 2]>,
    pub weapon_switched: Option<WeaponKind>,
    /// Set only on the frame the duel is decided
    pub finished: Option<MatchOutcome>,
}

#[derive(Resource, Debug, Clone)]
pub struct Duel {
    pub player: Player,
    pub bot: Bot,
    pub camera: OrbitCamera,
    /// Duel clock in milliseconds, advanced only by sanitised deltas
    clock_ms: f64,
    outcome: Option<MatchOutcome>,
    frame: u64,
}

impl Default for Duel {
    fn default() -> Self {
        Self::new(WeaponKind::Fist)
    }
}

impl Duel {
    pub fn new(player_weapon: WeaponKind) -> Self {
        let player = Player::new(player_weapon);
        let mut camera = OrbitCamera::default();
        camera.snap_to(player.body.position);

        Self {
            player,
            bot: Bot::default(),
            camera,
            clock_ms: 0.0,
            outcome: None,
            frame: 0,
        }
    }

    /// Reset the log and record the start of the duel.
    pub fn begin(&self, log: &mut CombatLog) {
        log.clear();
        log.log(
            CombatLogEventType::MatchEvent,
            format!(
                "Duel started: {} ({}) vs {} ({})",
                self.player.name(),
                self.player.equipped().name(),
                self.bot.name(),
                self.bot.weapon.name()
            ),
        );
        info!("Duel started");
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn match_time_secs(&self) -> f32 {
        (self.clock_ms / 1000.0) as f32
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn body(&self, side: Side) -> &Body {
        match side {
            Side::Player => &self.player.body,
            Side::Bot => &self.bot.body,
        }
    }

    /// Advance the duel by one frame.
    pub fn tick(&mut self, input: &InputSnapshot, raw_dt: f32, log: &mut CombatLog) -> TickReport {
        let mut report = TickReport::default();
        if self.outcome.is_some() {
            return report;
        }

        let dt = sanitize_frame_delta(raw_dt);
        self.clock_ms += f64::from(dt) * 1000.0;
        self.frame += 1;
        log.match_time = self.match_time_secs();
        let now = self.clock_ms;

        self.camera
            .apply_look(input.look_delta, input.pointer_captured);

        if let Some(kind) = input.equip {
            if self.player.switch_weapon(kind, log) {
                report.weapon_switched = Some(kind);
            }
        }

        if input.attack {
            report.player_attack = Some(self.player.attack(&mut self.bot, now, log));
        }

        let direction = if input.is_moving() {
            let (forward, right) = self.camera.movement_basis();
            input.move_direction(forward, right)
        } else {
            Vec3::ZERO
        };
        if direction != Vec3::ZERO {
            self.player.move_by(direction, dt);
        } else {
            self.player.stop_walking();
        }
        self.player.update(now);

        let decision = self.bot.decide(&mut self.player, now, dt, log);
        if let Some(outcome) = decision.attack {
            report.bot_attack.push(outcome);
        }

        self.camera.update(self.player.body.position);

        report.finished = self.check_terminal(log);
        report
    }

    /// Latch the outcome once either fighter is down.
    fn check_terminal(&mut self, log: &mut CombatLog) -> Option<MatchOutcome> {
        if self.outcome.is_some() {
            return None;
        }

        let outcome = if !self.player.is_alive() {
            MatchOutcome::Defeat
        } else if !self.bot.is_alive() {
            MatchOutcome::Victory
        } else {
            return None;
        };

        self.outcome = Some(outcome);
        log.log(CombatLogEventType::MatchEvent, outcome.banner().to_string());
        Some(outcome)
    }

    /// Summary used when saving the combat log.
    pub fn metadata(&self) -> MatchMetadata {
        MatchMetadata {
            outcome: self.outcome.map(|o| o.banner().to_string()),
            match_time: self.match_time_secs(),
            player: combatant_metadata(&self.player.body),
            bot: combatant_metadata(&self.bot.body),
        }
    }
}

fn combatant_metadata(body: &Body) -> CombatantMetadata {
    CombatantMetadata {
        name: body.vitals.name.clone(),
        max_health: body.vitals.max_health,
        final_health: body.vitals.health(),
        final_position: (body.position.x, body.position.y, body.position.z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::bot::BOT_SPAWN;
    use crate::actors::player::PLAYER_SPAWN;

    #[test]
    fn test_frame_delta_sanitising() {
        assert_eq!(sanitize_frame_delta(0.016), 0.016);
        assert_eq!(sanitize_frame_delta(5.0), MAX_FRAME_DELTA);
        assert_eq!(sanitize_frame_delta(-1.0), 0.0);
        assert_eq!(sanitize_frame_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_frame_delta(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_clock_advances_by_clamped_delta() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        duel.tick(&InputSnapshot::default(), 10.0, &mut log);
        assert!((duel.clock_ms() - 100.0).abs() < 1e-3);
        assert_eq!(duel.frame(), 1);
    }

    #[test]
    fn test_camera_starts_snapped_to_player() {
        let duel = Duel::default();
        assert_eq!(duel.camera.position(), duel.camera.target_position(PLAYER_SPAWN));
    }

    #[test]
    fn test_forward_key_walks_away_from_camera() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        let input = InputSnapshot {
            forward: true,
            ..default()
        };
        duel.tick(&input, 0.05, &mut log);
        // Yaw 0 puts the camera on +Z, so forward is -Z at 8 u/s
        let moved = duel.player.body.position - PLAYER_SPAWN;
        assert!((moved - Vec3::new(0.0, 0.0, -0.4)).length() < 1e-4);
    }

    #[test]
    fn test_bot_closes_in_on_idle_player() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        for _ in 0..10 {
            duel.tick(&InputSnapshot::default(), 0.1, &mut log);
        }
        assert!((duel.bot.body.position.x - (BOT_SPAWN.x + 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_defeat_checked_before_victory() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        duel.player.take_damage(100.0);
        duel.bot.take_damage(100.0);

        let report = duel.tick(&InputSnapshot::default(), 0.016, &mut log);
        assert_eq!(report.finished, Some(MatchOutcome::Defeat));
        assert_eq!(duel.outcome(), Some(MatchOutcome::Defeat));
    }

    #[test]
    fn test_latched_duel_ignores_input() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        duel.bot.take_damage(100.0);
        duel.tick(&InputSnapshot::default(), 0.016, &mut log);
        assert!(duel.is_over());

        let position = duel.player.body.position;
        let frame = duel.frame();
        let input = InputSnapshot {
            forward: true,
            attack: true,
            equip: Some(WeaponKind::Sword),
            ..default()
        };
        let report = duel.tick(&input, 0.016, &mut log);
        assert_eq!(report, TickReport::default());
        assert_eq!(duel.player.body.position, position);
        assert_eq!(duel.frame(), frame);
        assert_eq!(duel.player.equipped(), WeaponKind::Fist);
    }

    #[test]
    fn test_metadata_reports_outcome() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        duel.bot.take_damage(100.0);
        duel.tick(&InputSnapshot::default(), 0.016, &mut log);

        let metadata = duel.metadata();
        assert_eq!(metadata.outcome.as_deref(), Some("VICTORY"));
        assert_eq!(metadata.bot.final_health, 0.0);
        assert_eq!(metadata.player.final_health, 100.0);
    }

    #[test]
    fn test_outcome_names_the_winner() {
        assert_eq!(MatchOutcome::Victory.winner(), Side::Player);
        assert_eq!(MatchOutcome::Defeat.winner(), Side::Bot);
        assert_eq!(MatchOutcome::Defeat.banner(), "DEFEAT");
    }

    #[test]
    fn test_opposite_keys_leave_player_in_place() {
        let mut duel = Duel::default();
        let mut log = CombatLog::default();
        let input = InputSnapshot {
            left: true,
            right: true,
            ..Default::default()
        };

        duel.tick(&input, 0.1, &mut log);
        assert_eq!(duel.player.body.position, PLAYER_SPAWN);
        assert_eq!(duel.player.body.walk.phase, 0.0);
    }
}
