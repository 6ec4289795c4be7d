//! Arena Duel - third-person melee duel against a bot
//!
//! Runs the windowed duel by default, or a scripted headless duel with
//! `--headless <config.json>`.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use arenaduel::camera::CameraPlugin;
use arenaduel::cli::{self, Args};
use arenaduel::combat::CombatPlugin;
use arenaduel::duel::DuelPlugin;
use arenaduel::headless::{self, HeadlessMatchConfig};
use arenaduel::settings::SettingsPlugin;
use arenaduel::ui::UiPlugin;

fn main() {
    let args = cli::parse_args();

    if let Some(config_path) = args.headless.clone() {
        if let Err(e) = run_headless(&args, &config_path) {
            eprintln!("Headless match failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena Duel".to_string(),
                resolution: (1280.0, 720.0).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Our game plugins
        .add_plugins((
            EguiPlugin,
            SettingsPlugin,
            CombatPlugin,
            CameraPlugin,
            DuelPlugin,
            UiPlugin,
        ))
        .run();
}

fn run_headless(args: &Args, config_path: &std::path::Path) -> Result<(), String> {
    let mut config = HeadlessMatchConfig::load_from_file(config_path)?;
    args.apply_overrides(&mut config)?;

    let result = headless::run_headless_match(config)?;
    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| format!("Failed to serialize match result: {}", e))?;
    println!("{}", json);
    Ok(())
}
