//! Persistent match settings
//!
//! Pacing and balance knobs, saved to and loaded from a JSON file in the
//! config directory. A missing or malformed file silently falls back to
//! defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/match_settings.json";

/// Pacing and balance parameters for a match
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct MatchSettings {
    /// Seconds between two consecutive script actions
    pub step_delay: f32,
    /// Pause before continuous mode fires the next turn
    pub continuous_turn_delay: f32,
    /// Seconds a combatant may hold the turn without executing
    pub edit_time_limit: f32,
    /// Damage per landed shot
    pub shot_damage: i32,
    /// Starting health per combatant
    pub max_health: i32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            continuous_turn_delay: DEFAULT_CONTINUOUS_TURN_DELAY,
            edit_time_limit: DEFAULT_EDIT_TIME_LIMIT,
            shot_damage: DEFAULT_SHOT_DAMAGE,
            max_health: DEFAULT_MAX_HEALTH,
        }
    }
}

impl MatchSettings {
    /// Load settings from file, or return defaults if unavailable
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            info!("no {} found, using defaults", SETTINGS_FILE);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("loaded settings from {}", SETTINGS_FILE);
                    settings
                }
                Err(e) => {
                    warn!("failed to parse {}: {}, using defaults", SETTINGS_FILE, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}, using defaults", SETTINGS_FILE, e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(SETTINGS_FILE).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(SETTINGS_FILE, json)?;
        info!("saved settings to {}", SETTINGS_FILE);
        Ok(())
    }

    /// Zeroed pacing for headless tests: every update advances one step and
    /// continuous mode chains turns immediately.
    pub fn instant() -> Self {
        Self {
            step_delay: 0.0,
            continuous_turn_delay: 0.0,
            ..Default::default()
        }
    }
}

/// Script text boxes for the two combatants
#[derive(Resource, Debug, Clone)]
pub struct ScriptTexts {
    pub a: String,
    pub b: String,
}

impl Default for ScriptTexts {
    fn default() -> Self {
        Self {
            a: DEFAULT_SCRIPT_A.to_string(),
            b: DEFAULT_SCRIPT_B.to_string(),
        }
    }
}

impl ScriptTexts {
    pub fn get(&self, actor: crate::actor::ActorId) -> &str {
        match actor {
            crate::actor::ActorId::A => &self.a,
            crate::actor::ActorId::B => &self.b,
        }
    }

    pub fn set(&mut self, actor: crate::actor::ActorId, text: impl Into<String>) {
        match actor {
            crate::actor::ActorId::A => self.a = text.into(),
            crate::actor::ActorId::B => self.b = text.into(),
        }
    }
}
