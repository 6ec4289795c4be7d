//! Headless match execution
//!
//! Runs a duel without any graphical output, suitable for automated testing.
//! Time advances by a fixed step per frame, so a given config always plays
//! out the same way.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::Serialize;
use std::time::Duration;

use crate::actors::Body;
use crate::combat::log::CombatLog;
use crate::combat::weapon::WeaponKind;
use crate::combat::CombatPlugin;
use crate::duel::autopilot::{drive_autopilot, Autopilot};
use crate::duel::constants::MAX_FRAME_DELTA;
// Use the stable systems API instead of importing internal functions directly
use crate::duel::systems::{self, DuelSystemPhase};
use crate::duel::{Duel, MatchOutcome};
use crate::input::InputSnapshot;

use super::config::HeadlessMatchConfig;

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing and analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Victory or defeat from the player's point of view, or None for a draw
    pub outcome: Option<MatchOutcome>,
    /// Duel clock at the end of the match, in seconds
    pub match_time_secs: f32,
    /// Frames the duel was ticked
    pub frames: u64,
    pub player: ActorResult,
    pub bot: ActorResult,
}

/// Statistics for one fighter after the match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorResult {
    pub name: String,
    pub max_health: f32,
    /// Health remaining at match end (0 if dead)
    pub final_health: f32,
    pub survived: bool,
    /// Total damage dealt during the match
    pub damage_dealt: f32,
    pub hits_landed: usize,
}

impl ActorResult {
    fn from_body(body: &Body, log: &CombatLog) -> Self {
        let name = body.vitals.name.clone();
        Self {
            max_health: body.vitals.max_health,
            final_health: body.vitals.health(),
            survived: body.vitals.is_alive(),
            damage_dealt: log.total_damage_by(&name),
            hits_landed: log.hits_by(&name).len(),
            name,
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Maximum match duration before declaring a draw
    pub max_duration: f32,
    /// Custom output path for match log
    pub output_path: Option<String>,
    /// Whether the match has completed
    pub match_complete: bool,
    /// Match result (populated when match completes)
    pub result: Option<MatchResult>,
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    config: HeadlessMatchConfig,
    weapon: WeaponKind,
}

impl HeadlessPlugin {
    /// Validate `config` up front so `build` cannot fail.
    pub fn new(config: HeadlessMatchConfig) -> Result<Self, String> {
        config.validate()?;
        let weapon = config.weapon()?;
        Ok(Self { config, weapon })
    }
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Duel::new(self.weapon))
            .init_resource::<InputSnapshot>()
            .insert_resource(Autopilot {
                enabled: self.config.player_autopilot,
            })
            .insert_resource(HeadlessMatchState {
                max_duration: self.config.max_duration_secs,
                output_path: self.config.output_path.clone(),
                match_complete: false,
                result: None,
            })
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
                self.config.frame_delta_secs(),
            )));

        // Configure duel system phase ordering
        systems::configure_duel_system_ordering(app);

        // Add core duel systems using the shared API (always run in headless mode)
        systems::add_core_duel_systems(app, || true);

        // Autopilot stands in for the keyboard; the end check runs after the tick
        app.add_systems(Update, drive_autopilot.in_set(DuelSystemPhase::Input))
            .add_systems(
                Update,
                headless_check_match_end.after(DuelSystemPhase::Simulation),
            )
            .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Check if the match has ended (a fighter is down, or timeout)
fn headless_check_match_end(
    duel: Res<Duel>,
    combat_log: Res<CombatLog>,
    mut headless_state: ResMut<HeadlessMatchState>,
) {
    if headless_state.match_complete {
        return;
    }

    match duel.outcome() {
        Some(outcome) => {
            info!(
                "Duel ended after {:.1}s: {}",
                duel.match_time_secs(),
                outcome.banner()
            );
        }
        None if duel.match_time_secs() >= headless_state.max_duration => {
            info!(
                "Duel timed out after {:.1}s - declaring DRAW",
                duel.match_time_secs()
            );
        }
        None => return,
    }

    headless_state.result = Some(build_match_result(&duel, &combat_log));
    headless_state.match_complete = true;

    if let Some(path) = headless_state.output_path.as_deref() {
        save_headless_match_log(&duel, &combat_log, path);
    }
}

/// Build the MatchResult from the final duel state
pub fn build_match_result(duel: &Duel, combat_log: &CombatLog) -> MatchResult {
    MatchResult {
        outcome: duel.outcome(),
        match_time_secs: duel.match_time_secs(),
        frames: duel.frame(),
        player: ActorResult::from_body(&duel.player.body, combat_log),
        bot: ActorResult::from_body(&duel.bot.body, combat_log),
    }
}

/// Save the combat log to a file
fn save_headless_match_log(duel: &Duel, combat_log: &CombatLog, path: &str) {
    match combat_log.save_to_file(&duel.metadata(), Some(path)) {
        Ok(filename) => {
            println!("Match complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save combat log: {}", e);
        }
    }
}

/// Exit the app when the match is complete
fn headless_exit_on_complete(
    headless_state: Res<HeadlessMatchState>,
    mut exit: EventWriter<AppExit>,
) {
    if headless_state.match_complete {
        exit.send(AppExit::Success);
    }
}

/// Most frames a match may take before the runner gives up. Each frame
/// advances the duel clock by the frame step, capped like any other delta.
pub fn frame_budget(config: &HeadlessMatchConfig) -> u64 {
    let step = (config.frame_delta_secs() as f32).min(MAX_FRAME_DELTA);
    let frames = (config.max_duration_secs / step).ceil() as u64;
    frames.saturating_mul(2).saturating_add(10)
}

/// Build a windowless app that plays one duel.
pub fn build_headless_app(config: HeadlessMatchConfig) -> Result<App, String> {
    let plugin = HeadlessPlugin::new(config)?;

    let mut app = App::new();
    app
        // Minimal plugins - no window, no rendering
        .add_plugins(MinimalPlugins)
        .add_plugins(CombatPlugin)
        .add_plugins(plugin);
    Ok(app)
}

/// Step `app` until the match completes or `max_frames` have run.
pub fn run_to_completion(app: &mut App, max_frames: u64) -> Result<MatchResult, String> {
    app.finish();
    app.cleanup();

    for _ in 0..max_frames {
        app.update();

        if let Some(result) = app
            .world()
            .get_resource::<HeadlessMatchState>()
            .and_then(|state| state.result.clone())
        {
            return Ok(result);
        }
    }

    Err(format!("Duel did not finish within {} frames", max_frames))
}

/// Play a duel to completion and return the result, without logging setup.
pub fn simulate_match(config: HeadlessMatchConfig) -> Result<MatchResult, String> {
    let max_frames = frame_budget(&config);
    let mut app = build_headless_app(config)?;
    run_to_completion(&mut app, max_frames)
}

/// Run a headless match with the given configuration
pub fn run_headless_match(config: HeadlessMatchConfig) -> Result<MatchResult, String> {
    println!("Starting headless duel simulation...");
    println!("  Player weapon: {}", config.player_weapon);
    println!("  Autopilot: {}", config.player_autopilot);
    println!("  Frame rate: {}", config.frame_rate);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let max_frames = frame_budget(&config);
    let mut app = build_headless_app(config)?;
    app.add_plugins(LogPlugin::default());
    run_to_completion(&mut app, max_frames)
}
