//! JSON configuration parsing for headless mode
//!
//! Parses JSON duel configurations and validates them before a match starts.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::combat::weapon::WeaponKind;

/// Highest simulated frame rate a config may ask for
pub const MAX_FRAME_RATE: u32 = 480;

/// Headless duel configuration loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Player's starting weapon: "Fist" or "Sword" (default: "Fist")
    #[serde(default = "default_weapon")]
    pub player_weapon: String,
    /// Maximum match duration in seconds before declaring a draw (default: 120)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulated frames per second (default: 60)
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Custom output path for match log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Drive the player with the autopilot; when false the player stands idle
    #[serde(default = "default_autopilot")]
    pub player_autopilot: bool,
}

fn default_weapon() -> String {
    WeaponKind::Fist.name().to_string()
}

fn default_max_duration() -> f32 {
    120.0
}

fn default_frame_rate() -> u32 {
    60
}

fn default_autopilot() -> bool {
    true
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            player_weapon: default_weapon(),
            max_duration_secs: default_max_duration(),
            frame_rate: default_frame_rate(),
            output_path: None,
            player_autopilot: default_autopilot(),
        }
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_json_str(&contents)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let config: HeadlessMatchConfig = serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.weapon()?;

        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }

        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(format!(
                "frame_rate must be between 1 and {} (got {})",
                MAX_FRAME_RATE, self.frame_rate
            ));
        }

        Ok(())
    }

    /// Player's starting weapon
    pub fn weapon(&self) -> Result<WeaponKind, String> {
        WeaponKind::parse(&self.player_weapon)
    }

    /// Length of one simulated frame in seconds
    pub fn frame_delta_secs(&self) -> f64 {
        1.0 / f64::from(self.frame_rate.max(1))
    }
}
