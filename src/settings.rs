//! Game settings and preferences
//!
//! Persisted separately from the highscore as JSON. Loading never fails;
//! anything unreadable falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Night backdrop; carried into each round's config
    pub night_mode: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            night_mode: false,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.45,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective sound-effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| PersistenceError::Encode {
            what: "settings",
            source,
        })?;
        fs::write(path, json).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains() {
        let mut settings = Settings::default();
        assert!((settings.sfx_gain() - 0.8).abs() < 1e-6);
        assert!((settings.music_gain() - 0.36).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.sfx_gain(), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("ong-jump-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            night_mode: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_malformed_falls_back() {
        let dir = std::env::temp_dir().join(format!("ong-jump-settings-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ night_mode: maybe").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
