//! Headless mode for automated testing
//!
//! Plays a full duel without any graphical output. The player is driven by
//! the autopilot (or stands idle), the bot runs its normal policy, and the
//! result is returned as a `MatchResult`.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless duel
//! cargo run --release -- --headless duel_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "player_weapon": "Sword",
//!   "max_duration_secs": 120,
//!   "frame_rate": 60,
//!   "player_autopilot": true
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, simulate_match, ActorResult, MatchResult};
