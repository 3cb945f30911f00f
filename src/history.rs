//! Landing history
//!
//! Persisted to LocalStorage, tracks the most recent landings and per-slot
//! totals for the results panel.

use serde::{Deserialize, Serialize};

use crate::sim::Landing;

/// Maximum number of recent landings to keep
pub const MAX_RECENT: usize = 50;

/// Landing history and running statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LandingHistory {
    /// Most recent landings (newest first)
    pub recent: Vec<Landing>,
    /// Hit count per slot index
    pub slot_hits: Vec<u64>,
    /// Sum of every multiplier seen
    pub multiplier_sum: f64,
    /// Best multiplier seen
    pub best: Option<f32>,
}

impl LandingHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arklinko_history";

    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a landing
    pub fn record(&mut self, landing: Landing) {
        if self.slot_hits.len() <= landing.slot {
            self.slot_hits.resize(landing.slot + 1, 0);
        }
        self.slot_hits[landing.slot] += 1;
        self.multiplier_sum += f64::from(landing.multiplier);
        self.best = Some(match self.best {
            Some(best) => best.max(landing.multiplier),
            None => landing.multiplier,
        });

        self.recent.insert(0, landing);
        self.recent.truncate(MAX_RECENT);
    }

    /// Total landings ever recorded
    pub fn total_drops(&self) -> u64 {
        self.slot_hits.iter().sum()
    }

    /// Mean multiplier over all landings (None if empty)
    pub fn mean_multiplier(&self) -> Option<f64> {
        let total = self.total_drops();
        (total > 0).then(|| self.multiplier_sum / total as f64)
    }

    /// Forget every landing (player reset)
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(history) = serde_json::from_str::<LandingHistory>(&json) {
                    log::info!("Loaded {} past landings", history.total_drops());
                    return history;
                }
            }
        }

        log::info!("No landing history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("History saved ({} landings)", self.total_drops());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landing(ball_id: u32, slot: usize, multiplier: f32) -> Landing {
        Landing {
            ball_id,
            slot,
            multiplier,
        }
    }

    #[test]
    fn test_record_updates_stats() {
        let mut history = LandingHistory::new();
        assert_eq!(history.total_drops(), 0);
        assert_eq!(history.mean_multiplier(), None);

        history.record(landing(1, 9, -1.0));
        history.record(landing(2, 0, 10.0));
        history.record(landing(3, 9, -1.0));

        assert_eq!(history.total_drops(), 3);
        assert_eq!(history.slot_hits[9], 2);
        assert_eq!(history.slot_hits[0], 1);
        assert_eq!(history.best, Some(10.0));
        assert_eq!(history.mean_multiplier(), Some(8.0 / 3.0));
        assert_eq!(history.recent[0].ball_id, 3);
    }

    #[test]
    fn test_recent_is_bounded() {
        let mut history = LandingHistory::new();
        for id in 0..(MAX_RECENT as u32 + 10) {
            history.record(landing(id, 4, 2.0));
        }
        assert_eq!(history.recent.len(), MAX_RECENT);
        assert_eq!(history.total_drops(), MAX_RECENT as u64 + 10);
        assert_eq!(history.recent[0].ball_id, MAX_RECENT as u32 + 9);
    }

    #[test]
    fn test_json_round_trip() {
        let mut history = LandingHistory::new();
        history.record(landing(1, 5, -0.5));
        let json = serde_json::to_string(&history).expect("serialize");
        let back: LandingHistory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, history);
    }

    #[test]
    fn test_clear() {
        let mut history = LandingHistory::new();
        history.record(landing(1, 5, -0.5));
        history.clear();
        assert_eq!(history, LandingHistory::new());
        assert_eq!(history.total_drops(), 0);
    }
}
