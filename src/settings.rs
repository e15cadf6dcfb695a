//! Startup configuration
//!
//! Supplied by the caller at startup; optionally read from a JSON file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,

    // === Loop ===
    /// State loaded by `App::create`
    pub initial_state: String,
    /// Fixed simulation step in milliseconds
    pub step_ms: u64,
    /// Upper bound on steps drained per frame
    pub max_substeps: u32,
    /// Frame deltas longer than this are clamped (debugger pauses, window drags)
    pub max_frame_ms: u64,

    // === Game ===
    /// Base seed; each run mixes in its run number
    pub seed: u64,
    /// Where the session record is persisted on dispose (None = in-memory only)
    pub session_path: Option<String>,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,

            initial_state: crate::states::LOADING.to_string(),
            step_ms: crate::consts::STEP_MS,
            max_substeps: crate::consts::MAX_SUBSTEPS,
            max_frame_ms: 250,

            seed: 0x5eed_1e55,
            session_path: None,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    #[inline]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms.max(1))
    }

    #[inline]
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, but a missing file means defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.initial_state, "loading");
        assert_eq!(settings.step(), Duration::from_millis(10));
        assert_eq!(settings.tuning.ufo_points, 70);
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let settings = Settings {
            step_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.step(), Duration::from_millis(1));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "library-invaders-settings-{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.initial_state = "menu".to_string();
        settings.tuning.creep = 9.0;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_error_for_load() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(Settings::load_or_default("/definitely/not/here.json").is_ok());
    }
}
