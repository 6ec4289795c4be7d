//! Command-line interface for Arena Duel
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

use crate::headless::HeadlessMatchConfig;

/// Third-person melee duel against a bot
#[derive(Parser, Debug)]
#[command(name = "arenaduel")]
#[command(about = "Third-person melee duel against a bot")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for match log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum match duration in seconds, overriding the config (headless mode only)
    #[arg(long, value_name = "SECS")]
    pub max_duration: Option<f32>,
}

impl Args {
    /// Apply command-line overrides to a loaded config and re-validate it.
    pub fn apply_overrides(&self, config: &mut HeadlessMatchConfig) -> Result<(), String> {
        if let Some(output) = &self.output {
            config.output_path = Some(output.to_string_lossy().into_owned());
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration_secs = max_duration;
        }
        config.validate()
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
