//! Player preferences
//!
//! Stored as a JSON file next to the driver, separate from any game state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute all audio
    pub muted: bool,

    // === Gameplay ===
    /// Let the demo planner play
    pub autopilot: bool,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            autopilot: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Could not load {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("lane_runner_settings_{}.json", std::process::id()));
        let settings = Settings {
            muted: true,
            seed: Some(42),
            ..Default::default()
        };
        settings.save_to_path(&path).expect("save");
        let loaded = Settings::load_from_path(&path).expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"autopilot": false}"#).expect("parse");
        assert!(!settings.autopilot);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_bad_files_fall_back() {
        let missing = std::env::temp_dir().join("lane_runner_missing_settings.json");
        assert!(matches!(
            Settings::load_from_path(&missing),
            Err(SettingsError::Io(_))
        ));
        assert_eq!(Settings::load_or_default(Some(&missing)), Settings::default());

        let garbage = std::env::temp_dir().join(format!("lane_runner_garbage_{}.json", std::process::id()));
        fs::write(&garbage, "not json").expect("write");
        let result = Settings::load_from_path(&garbage);
        let _ = fs::remove_file(&garbage);
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
