//! Combat logging
//!
//! Records all combat events for display and post-match analysis.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Timestamp in match time (seconds since the duel started)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Structured payload for hits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<HitRecord>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatLogEventType {
    /// A weapon connected
    Hit,
    /// Combatant died
    Death,
    /// Active weapon changed
    WeaponSwitch,
    /// Match event (start, victory, defeat, timeout)
    MatchEvent,
}

/// Who hit whom, with what, for how much
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    pub attacker: String,
    pub target: String,
    pub weapon: String,
    pub damage: f32,
}

/// Per-fighter summary stored alongside a saved log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantMetadata {
    pub name: String,
    pub max_health: f32,
    pub final_health: f32,
    pub final_position: (f32, f32, f32),
}

/// Match summary stored alongside a saved log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchMetadata {
    /// "Victory", "Defeat", or None for a draw/timeout
    pub outcome: Option<String>,
    pub match_time: f32,
    pub player: CombatantMetadata,
    pub bot: CombatantMetadata,
}

#[derive(Serialize)]
struct SavedMatch<'a> {
    metadata: &'a MatchMetadata,
    entries: &'a [CombatLogEntry],
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug, Clone)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current match time
    pub match_time: f32,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            hit: None,
        });
    }

    /// Record a successful attack.
    pub fn log_hit(&mut self, attacker: &str, target: &str, weapon: &str, damage: f32) {
        let message = format!(
            "[{}] attacked [{}] with {} for {} damage!",
            attacker, target, weapon, damage
        );
        info!("{}", message);
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::Hit,
            message,
            hit: Some(HitRecord {
                attacker: attacker.to_string(),
                target: target.to_string(),
                weapon: weapon.to_string(),
                damage,
            }),
        });
    }

    /// Record a death. Callers only invoke this on the killing blow.
    pub fn log_death(&mut self, victim: &str, killer: &str) {
        self.log(
            CombatLogEventType::Death,
            format!("[{}] has been defeated by [{}]", victim, killer),
        );
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// All hits landed by the named attacker
    pub fn hits_by(&self, attacker: &str) -> Vec<&HitRecord> {
        self.entries
            .iter()
            .filter_map(|e| e.hit.as_ref())
            .filter(|h| h.attacker == attacker)
            .collect()
    }

    /// Sum of damage dealt by the named attacker
    pub fn total_damage_by(&self, attacker: &str) -> f32 {
        self.hits_by(attacker).iter().map(|h| h.damage).sum()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Save the log with match metadata as pretty JSON.
    ///
    /// Returns the path written. Without an explicit path the file goes to
    /// `match_logs/duel_<unix seconds>.json`.
    pub fn save_to_file(
        &self,
        metadata: &MatchMetadata,
        path: Option<&str>,
    ) -> Result<String, String> {
        let filename = match path {
            Some(p) => p.to_string(),
            None => {
                let secs = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                format!("match_logs/duel_{}.json", secs)
            }
        };

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        let saved = SavedMatch {
            metadata,
            entries: &self.entries,
        };
        let contents = serde_json::to_string_pretty(&saved)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(&filename, contents)
            .map_err(|e| format!("Failed to write combat log: {}", e))?;

        Ok(filename)
    }
}
