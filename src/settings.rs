//! User settings
//!
//! Look sensitivity, vsync, keybindings, and optional character models,
//! persisted as RON next to the executable. Changes are saved as soon as
//! they happen and applied without a restart.

use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::camera::{sanitize_sensitivity, DEFAULT_SENSITIVITY};
use crate::keybindings::Keybindings;

/// Radians of camera turn per pixel of pointer motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookSensitivity {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for LookSensitivity {
    fn default() -> Self {
        Self {
            horizontal: DEFAULT_SENSITIVITY,
            vertical: DEFAULT_SENSITIVITY,
        }
    }
}

/// glTF files to dress the fighters in. `None` keeps the procedural body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPaths {
    pub player: Option<String>,
    pub bot: Option<String>,
}

/// User-configurable game settings
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub look_sensitivity: LookSensitivity,
    pub vsync: bool,
    pub keybindings: Keybindings,
    pub models: ModelPaths,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            look_sensitivity: LookSensitivity::default(),
            vsync: true,
            keybindings: Keybindings::default(),
            models: ModelPaths::default(),
        }
    }
}

impl GameSettings {
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn sanitize(&mut self) {
        self.look_sensitivity.horizontal = sanitize_sensitivity(self.look_sensitivity.horizontal);
        self.look_sensitivity.vertical = sanitize_sensitivity(self.look_sensitivity.vertical);
        self.keybindings.fill_missing();
    }

    /// Parse settings from RON text.
    pub fn from_ron(contents: &str) -> Result<Self, String> {
        let mut settings: GameSettings = ron::from_str(contents)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {:?}: {}", path, e))?;
        Self::from_ron(&contents)
    }

    /// Load `settings.ron`, falling back to defaults when it is missing or bad.
    pub fn load() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(path, contents)
            .map_err(|e| format!("Failed to write settings file {:?}: {}", path, e))?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), String> {
        let path = Self::settings_path();
        self.save_to(&path)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Plugin for managing game settings
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = GameSettings::load();

        // Keybindings also live as their own resource for input systems
        let keybindings = settings.keybindings.clone();

        app.insert_resource(settings)
            .insert_resource(keybindings)
            .add_systems(Update, (save_settings_on_change, apply_vsync, sync_keybindings));
    }
}

fn save_settings_on_change(settings: Res<GameSettings>) {
    if settings.is_changed() && !settings.is_added() {
        if let Err(e) = settings.save() {
            error!("Failed to save settings: {}", e);
        }
    }
}

fn apply_vsync(settings: Res<GameSettings>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    if let Ok(mut window) = windows.get_single_mut() {
        let mode = if settings.vsync {
            PresentMode::AutoVsync
        } else {
            PresentMode::AutoNoVsync
        };
        if window.present_mode != mode {
            window.present_mode = mode;
            info!("Applied VSync: {}", settings.vsync);
        }
    }
}

/// Keep the Keybindings resource in step with GameSettings
fn sync_keybindings(settings: Res<GameSettings>, mut keybindings: ResMut<Keybindings>) {
    if settings.is_changed() && !settings.is_added() && *keybindings != settings.keybindings {
        *keybindings = settings.keybindings.clone();
        info!("Synced keybindings from settings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{MAX_SENSITIVITY, MIN_SENSITIVITY};
    use crate::keybindings::GameAction;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = GameSettings::from_ron("()").unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_sensitivity_is_clamped_on_load() {
        let settings = GameSettings::from_ron(
            "(look_sensitivity: (horizontal: 0.5, vertical: 0.00001))",
        )
        .unwrap();
        assert_eq!(settings.look_sensitivity.horizontal, MAX_SENSITIVITY);
        assert_eq!(settings.look_sensitivity.vertical, MIN_SENSITIVITY);
    }

    #[test]
    fn test_model_paths_parse() {
        let settings =
            GameSettings::from_ron(r#"(models: (player: Some("models/knight.glb"), bot: None))"#)
                .unwrap();
        assert_eq!(settings.models.player.as_deref(), Some("models/knight.glb"));
        assert_eq!(settings.models.bot, None);
        assert!(settings.keybindings.get(GameAction::Attack).is_some());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(GameSettings::from_ron("not ron at all").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join("arenaduel_settings_test.ron");
        let mut settings = GameSettings::default();
        settings.vsync = false;
        settings.look_sensitivity.vertical = 0.004;
        settings.save_to(&path).unwrap();

        let loaded = GameSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }
}
