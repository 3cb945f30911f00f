//! Player settings and board configuration
//!
//! Persisted as JSON: LocalStorage on the web, an optional file on native
//! (`ARKLINKO_SETTINGS=/path/to/settings.json`).

use serde::{Deserialize, Serialize};

use crate::driver::DEFAULT_MAX_BALLS;
use crate::sim::BoardConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board layout, physics and payout table
    pub board: BoardConfig,

    // === Play ===
    /// Maximum balls in flight at once
    pub max_balls: usize,
    /// Drop a ball every N frames (0 = manual drops only)
    pub auto_drop_frames: u32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the recent-results strip
    pub show_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            max_balls: DEFAULT_MAX_BALLS,
            auto_drop_frames: 0,
            seed: None,
            show_fps: true,
            show_history: true,
        }
    }
}

impl Settings {
    /// Environment variable naming a native settings file
    pub const PATH_ENV: &'static str = "ARKLINKO_SETTINGS";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arklinko_settings";

    /// Parse settings JSON, replacing an invalid board with the default one
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Fall back to the default board if the stored one is rejected
    pub fn sanitize(&mut self) {
        if let Err(e) = self.board.validate() {
            log::warn!("Stored board rejected ({}), using default board", e);
            self.board = BoardConfig::default();
        }
        self.max_balls = self.max_balls.max(1);
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `ARKLINKO_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_balls, DEFAULT_MAX_BALLS);
        assert_eq!(settings.board, BoardConfig::default());
        assert_eq!(settings.auto_drop_frames, 0);
    }

    #[test]
    fn test_partial_json() {
        let settings =
            Settings::from_json(r#"{"max_balls": 3, "seed": 7, "board": {"rows": 10}}"#)
                .expect("valid json");
        assert_eq!(settings.max_balls, 3);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.board.rows, 10);
        assert!(settings.show_fps);
    }

    #[test]
    fn test_invalid_board_falls_back() {
        let settings = Settings::from_json(r#"{"board": {"multipliers": [3.0, 1.0]}}"#)
            .expect("valid json");
        assert_eq!(settings.board, BoardConfig::default());
    }

    #[test]
    fn test_unplayable_boards_fall_back() {
        for json in [
            r#"{"board": {"first_row_pegs": 4294967295}}"#,
            r#"{"board": {"physics": {"gravity": 0.0}}}"#,
            r#"{"board": {"rows": 100000}}"#,
        ] {
            let settings = Settings::from_json(json).expect("valid json");
            assert_eq!(settings.board, BoardConfig::default(), "{}", json);
        }
    }

    #[test]
    fn test_zero_max_balls_clamped() {
        let settings = Settings::from_json(r#"{"max_balls": 0}"#).expect("valid json");
        assert_eq!(settings.max_balls, 1);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{not json").is_err());
    }
}
