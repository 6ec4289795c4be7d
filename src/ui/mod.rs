//! UI System
//!
//! In-duel HUD drawn with egui:
//! - Controls panel with both fighters' health and the equipped weapon
//! - Camera settings (look sensitivity sliders)
//! - Recent combat log lines
//! - Victory / defeat banner once the duel is decided

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::{PointerCapture, MAX_SENSITIVITY, MIN_SENSITIVITY};
use crate::combat::log::CombatLog;
use crate::combat::vitals::HealthBand;
use crate::duel::systems::DuelSystemPhase;
use crate::duel::{Duel, MatchOutcome, Side};
use crate::keybindings::{GameAction, Keybindings};
use crate::settings::GameSettings;

/// Combat log lines shown in the HUD
const LOG_LINES: usize = 8;

/// Slider step for look sensitivity
const SENSITIVITY_STEP: f64 = 0.0001;

/// Plugin for UI management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, duel_hud_ui.after(DuelSystemPhase::Simulation));
    }
}

/// Common colors used throughout the UI
pub mod colors {
    use bevy_egui::egui::Color32;

    /// Panel headings
    pub const HEADING: Color32 = Color32::from_rgb(230, 204, 153);
    /// Secondary text
    pub const MUTED: Color32 = Color32::from_rgb(150, 150, 150);
    pub const VICTORY: Color32 = Color32::from_rgb(80, 220, 80);
    pub const DEFEAT: Color32 = Color32::from_rgb(220, 60, 60);
    /// Translucent panel background
    pub const PANEL: Color32 = Color32::from_rgba_premultiplied(15, 15, 25, 200);
}

/// Font sizes used throughout the UI
pub mod fonts {
    /// Victory / defeat banner
    pub const BANNER: f32 = 72.0;
    /// Panel headings
    pub const HEADER: f32 = 18.0;
    /// Normal body text
    pub const BODY: f32 = 14.0;
    /// Combat log text
    pub const COMBAT_LOG: f32 = 12.0;
}

fn band_color(band: HealthBand) -> egui::Color32 {
    let hex = band.hex();
    egui::Color32::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn panel_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(colors::PANEL)
        .inner_margin(egui::Margin::same(10.0))
        .rounding(4.0)
}

fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(fonts::HEADER)
            .color(colors::HEADING),
    );
}

fn duel_hud_ui(
    mut contexts: EguiContexts,
    duel: Res<Duel>,
    keybindings: Res<Keybindings>,
    capture: Res<PointerCapture>,
    combat_log: Res<CombatLog>,
    mut settings: ResMut<GameSettings>,
) {
    // Use try_ctx_mut to gracefully handle window close
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    controls_panel(ctx, &duel, &keybindings, capture.captured);
    camera_settings_panel(ctx, &mut settings);
    combat_log_panel(ctx, &combat_log);

    if let Some(outcome) = duel.outcome() {
        outcome_banner(ctx, outcome);
    }
}

fn controls_panel(ctx: &egui::Context, duel: &Duel, keybindings: &Keybindings, captured: bool) {
    egui::Area::new(egui::Id::new("controls_panel"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                heading(ui, "Controls");
                for action in GameAction::all() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}: {}",
                            action.description(),
                            keybindings.binding_display(action)
                        ))
                        .size(fonts::BODY),
                    );
                }
                ui.label(
                    egui::RichText::new(if captured {
                        "Mouse: look around"
                    } else {
                        "Click the arena to capture the mouse"
                    })
                    .size(fonts::BODY)
                    .color(colors::MUTED),
                );

                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Weapon: {}", duel.player.equipped().name()))
                        .size(fonts::BODY),
                );
                for side in [Side::Player, Side::Bot] {
                    let vitals = &duel.body(side).vitals;
                    let bar = vitals.health_bar();
                    ui.label(
                        egui::RichText::new(format!(
                            "{}: {:.0} / {:.0}",
                            vitals.name,
                            vitals.health(),
                            vitals.max_health
                        ))
                        .size(fonts::BODY)
                        .color(band_color(bar.band)),
                    );
                }
            });
        });
}

fn camera_settings_panel(ctx: &egui::Context, settings: &mut ResMut<GameSettings>) {
    let mut horizontal = settings.look_sensitivity.horizontal;
    let mut vertical = settings.look_sensitivity.vertical;

    egui::Area::new(egui::Id::new("camera_settings_panel"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                heading(ui, "Camera Settings");
                ui.add(
                    egui::Slider::new(&mut horizontal, MIN_SENSITIVITY..=MAX_SENSITIVITY)
                        .step_by(SENSITIVITY_STEP)
                        .max_decimals(4)
                        .text("Horizontal"),
                );
                ui.add(
                    egui::Slider::new(&mut vertical, MIN_SENSITIVITY..=MAX_SENSITIVITY)
                        .step_by(SENSITIVITY_STEP)
                        .max_decimals(4)
                        .text("Vertical"),
                );
            });
        });

    // Mark the settings changed only when a slider moved
    let current = &settings.bypass_change_detection().look_sensitivity;
    if current.horizontal != horizontal || current.vertical != vertical {
        settings.look_sensitivity.horizontal = horizontal;
        settings.look_sensitivity.vertical = vertical;
    }
}

fn combat_log_panel(ctx: &egui::Context, combat_log: &CombatLog) {
    egui::Area::new(egui::Id::new("combat_log_panel"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_min_width(320.0);
                heading(ui, "Combat Log");
                for entry in combat_log.recent(LOG_LINES) {
                    ui.label(
                        egui::RichText::new(format!(
                            "[{:>6.2}s] {}",
                            entry.timestamp, entry.message
                        ))
                        .size(fonts::COMBAT_LOG)
                        .monospace(),
                    );
                }
            });
        });
}

fn outcome_banner(ctx: &egui::Context, outcome: MatchOutcome) {
    let color = match outcome {
        MatchOutcome::Victory => colors::VICTORY,
        MatchOutcome::Defeat => colors::DEFEAT,
    };

    egui::Area::new(egui::Id::new("outcome_banner"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(outcome.banner())
                    .size(fonts::BANNER)
                    .strong()
                    .color(color),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_match_health_bar() {
        assert_eq!(band_color(HealthBand::Green), egui::Color32::from_rgb(0, 255, 0));
        assert_eq!(band_color(HealthBand::Yellow), egui::Color32::from_rgb(255, 255, 0));
        assert_eq!(band_color(HealthBand::Red), egui::Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_slider_step_fits_range() {
        let steps = (f64::from(MAX_SENSITIVITY) - f64::from(MIN_SENSITIVITY)) / SENSITIVITY_STEP;
        assert!((steps - steps.round()).abs() < 1e-3);
    }
}
