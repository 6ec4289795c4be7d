//! Duel Systems API
//!
//! Stable entry point for the systems that drive a duel. Both the windowed
//! session and the headless runner add the core systems through here.
//!
//! ## System Phases
//!
//! 1. **Input** - fill the `InputSnapshot` (keyboard and mouse, or autopilot)
//! 2. **Simulation** - advance the `Duel` one frame and emit combat events
//! 3. **Presentation** - copy fighter state onto rendered entities
//!
//! ## Usage
//!
//! ```ignore
//! use arenaduel::duel::systems;
//!
//! systems::configure_duel_system_ordering(&mut app);
//! systems::add_core_duel_systems(&mut app, || true);
//! ```

use bevy::prelude::*;

use super::{Duel, Side};
use crate::combat::events::{AttackResolvedEvent, DuelEndedEvent, WeaponSwitchedEvent};
use crate::combat::log::CombatLog;
use crate::input::InputSnapshot;

/// System set labels for per-frame ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DuelSystemPhase {
    Input,
    Simulation,
    Presentation,
}

/// Chain the phases. Call once during app setup.
pub fn configure_duel_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            DuelSystemPhase::Input,
            DuelSystemPhase::Simulation,
            DuelSystemPhase::Presentation,
        )
            .chain(),
    );
}

/// Adds the systems every duel needs: the start-of-duel log entry and the
/// per-frame tick. Expects `Duel`, `CombatLog`, `InputSnapshot` and the
/// combat events to be registered.
///
/// # Example
/// ```ignore
/// // Windowed: only while the window has focus
/// add_core_duel_systems(&mut app, resource_exists::<Duel>);
///
/// // Headless (always run)
/// add_core_duel_systems(&mut app, || true);
/// ```
pub fn add_core_duel_systems<M>(app: &mut App, run_condition: impl Condition<M> + Clone)
where
    M: 'static,
{
    app.add_systems(Startup, begin_duel).add_systems(
        Update,
        tick_duel
            .in_set(DuelSystemPhase::Simulation)
            .run_if(run_condition),
    );
}

fn begin_duel(duel: Res<Duel>, mut combat_log: ResMut<CombatLog>) {
    duel.begin(&mut combat_log);
}

/// Advance the duel by the frame delta and publish what happened.
pub fn tick_duel(
    time: Res<Time>,
    input: Res<InputSnapshot>,
    mut duel: ResMut<Duel>,
    mut combat_log: ResMut<CombatLog>,
    mut attack_events: EventWriter<AttackResolvedEvent>,
    mut switch_events: EventWriter<WeaponSwitchedEvent>,
    mut ended_events: EventWriter<DuelEndedEvent>,
) {
    if duel.is_over() {
        return;
    }

    let report = duel.tick(&input, time.delta_secs(), &mut combat_log);

    if let Some(weapon) = report.weapon_switched {
        switch_events.send(WeaponSwitchedEvent { weapon });
    }

    if let Some(outcome) = report.player_attack {
        attack_events.send(AttackResolvedEvent {
            attacker: Side::Player,
            weapon: duel.player.equipped(),
            outcome,
        });
    }

    let bot_weapon = duel.bot.weapon.kind;
    for outcome in report.bot_attack {
        attack_events.send(AttackResolvedEvent {
            attacker: Side::Bot,
            weapon: bot_weapon,
            outcome,
        });
    }

    if let Some(outcome) = report.finished {
        ended_events.send(DuelEndedEvent { outcome });
    }
}
