//! Windowed duel session
//!
//! Wires the duel simulation into a rendered app: keyboard and mouse feed
//! the input snapshot, the core systems tick the duel, and the scene systems
//! copy the result onto the fighters.

use bevy::prelude::*;

use super::constants::{rgb, SKY_COLOR};
use super::models::poll_model_slots;
use super::scene::{
    apply_fighter_poses, spawn_duel_scene, sync_fighter_roots, update_health_bars,
    update_sword_visual,
};
use super::systems::{self, DuelSystemPhase};
use super::Duel;
use crate::input::{sample_input, InputSnapshot};

/// Plugin for the interactive duel
pub struct DuelPlugin;

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Duel>()
            .init_resource::<InputSnapshot>()
            .insert_resource(ClearColor(rgb(SKY_COLOR)));

        systems::configure_duel_system_ordering(app);
        systems::add_core_duel_systems(app, || true);

        app.add_systems(Startup, spawn_duel_scene)
            .add_systems(Update, sample_input.in_set(DuelSystemPhase::Input))
            .add_systems(
                Update,
                (
                    sync_fighter_roots,
                    apply_fighter_poses,
                    update_health_bars,
                    update_sword_visual,
                    poll_model_slots,
                )
                    .in_set(DuelSystemPhase::Presentation),
            );
    }
}
