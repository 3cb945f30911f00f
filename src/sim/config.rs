//! Board configuration
//!
//! Static for a session. Every field has a default so partial JSON overrides
//! (from settings storage) deserialize cleanly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected board configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("peg field needs at least one row and one peg per row")]
    EmptyPegField,
    #[error("multiplier table is empty")]
    NoSlots,
    #[error("multiplier table is not symmetric at slot {index}")]
    AsymmetricMultipliers { index: usize },
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidDamping { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
    #[error("widest peg row must hold at most {max} pegs")]
    PegFieldTooWide { max: u32 },
    #[error("peg spacing {spacing} leaves no gap between pegs of radius {peg_radius}")]
    PegsOverlap { spacing: f32, peg_radius: f32 },
    #[error("slot strip ({slot_height}) must sit below the top margin ({top_margin})")]
    SlotStripOverlap { slot_height: f32, top_margin: f32 },
}

/// Per-step physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Added to vy every step (pixels/step²)
    pub gravity: f32,
    /// Velocity scale applied on peg and wall bounces
    pub bounce_damping: f32,
    /// vx scale applied every step
    pub horizontal_damping: f32,
    /// Half-width of the uniform vx kick after a peg bounce
    pub collision_jitter: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_damping: BOUNCE_DAMPING,
            horizontal_damping: HORIZONTAL_DAMPING,
            collision_jitter: COLLISION_JITTER,
        }
    }
}

/// Board layout, physics and payout table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,
    pub rows: u32,
    pub first_row_pegs: u32,
    pub peg_radius: f32,
    pub ball_radius: f32,
    pub top_margin: f32,
    pub slot_height: f32,
    pub spawn_y: f32,
    pub spawn_jitter: f32,
    pub physics: PhysicsConstants,
    /// One entry per landing slot, left to right
    pub multipliers: Vec<f32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            rows: PEG_ROWS,
            first_row_pegs: FIRST_ROW_PEGS,
            peg_radius: PEG_RADIUS,
            ball_radius: BALL_RADIUS,
            top_margin: TOP_MARGIN,
            slot_height: SLOT_HEIGHT,
            spawn_y: SPAWN_Y,
            spawn_jitter: SPAWN_JITTER,
            physics: PhysicsConstants::default(),
            multipliers: MULTIPLIERS.to_vec(),
        }
    }
}

impl BoardConfig {
    /// Number of landing slots (equals the multiplier table length)
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.multipliers.len()
    }

    /// Width of one landing slot
    #[inline]
    pub fn slot_width(&self) -> f32 {
        self.width / self.slot_count() as f32
    }

    /// y coordinate where the slot strip begins
    #[inline]
    pub fn slot_top(&self) -> f32 {
        self.height - self.slot_height
    }

    /// Number of pegs in the widest (last) row
    #[inline]
    pub fn last_row_pegs(&self) -> u32 {
        self.first_row_pegs.saturating_add(self.rows.saturating_sub(1))
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("peg_radius", self.peg_radius),
            ("ball_radius", self.ball_radius),
            ("top_margin", self.top_margin),
            ("slot_height", self.slot_height),
            ("spawn_y", self.spawn_y),
            ("spawn_jitter", self.spawn_jitter),
            ("gravity", self.physics.gravity),
            ("bounce_damping", self.physics.bounce_damping),
            ("horizontal_damping", self.physics.horizontal_damping),
            ("collision_jitter", self.physics.collision_jitter),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }
        if !self.multipliers.iter().all(|m| m.is_finite()) {
            return Err(ConfigError::NonFinite {
                name: "multipliers",
            });
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.rows == 0 || self.first_row_pegs == 0 {
            return Err(ConfigError::EmptyPegField);
        }
        for (name, value) in [
            ("peg_radius", self.peg_radius),
            ("ball_radius", self.ball_radius),
            ("gravity", self.physics.gravity),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        let widest = self
            .first_row_pegs
            .checked_add(self.rows - 1)
            .filter(|&n| n <= MAX_ROW_PEGS)
            .ok_or(ConfigError::PegFieldTooWide { max: MAX_ROW_PEGS })?;
        let spacing = self.width / (widest + 1) as f32;
        if spacing <= 2.0 * self.peg_radius {
            return Err(ConfigError::PegsOverlap {
                spacing,
                peg_radius: self.peg_radius,
            });
        }
        if self.multipliers.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        let m = &self.multipliers;
        if let Some(index) = (0..m.len() / 2).find(|&i| m[i] != m[m.len() - 1 - i]) {
            return Err(ConfigError::AsymmetricMultipliers { index });
        }
        for (name, value) in [
            ("bounce_damping", self.physics.bounce_damping),
            ("horizontal_damping", self.physics.horizontal_damping),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidDamping { name, value });
            }
        }
        if self.slot_height < 0.0 || self.slot_top() <= self.top_margin {
            return Err(ConfigError::SlotStripOverlap {
                slot_height: self.slot_height,
                top_margin: self.top_margin,
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.slot_count(), 19);
        assert_eq!(config.last_row_pegs(), 19);
    }

    #[test]
    fn test_canonical_table_is_palindrome() {
        let m = MULTIPLIERS;
        for i in 0..m.len() {
            assert_eq!(m[i], m[m.len() - 1 - i]);
        }
    }

    #[test]
    fn test_rejects_asymmetric_table() {
        let config = BoardConfig {
            multipliers: vec![2.0, 1.0, 0.5],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AsymmetricMultipliers { index: 0 })
        );
    }

    #[test]
    fn test_rejects_empty_table() {
        let config = BoardConfig {
            multipliers: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSlots));
    }

    #[test]
    fn test_rejects_bad_damping() {
        let mut config = BoardConfig::default();
        config.physics.bounce_damping = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDamping { name: "bounce_damping", .. })
        ));
    }

    #[test]
    fn test_rejects_slot_strip_over_pegs() {
        let config = BoardConfig {
            slot_height: 950.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SlotStripOverlap { .. })
        ));
    }

    #[test]
    fn test_asymmetry_reported_at_first_mismatch() {
        let config = BoardConfig {
            multipliers: vec![3.0, 1.0, 2.0, 1.0000001, 3.0],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AsymmetricMultipliers { index: 1 })
        );
    }

    #[test]
    fn test_rejects_oversized_peg_field() {
        let config = BoardConfig {
            first_row_pegs: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.last_row_pegs(), u32::MAX);
        assert_eq!(
            config.validate(),
            Err(ConfigError::PegFieldTooWide { max: MAX_ROW_PEGS })
        );

        let config = BoardConfig {
            rows: 1_000_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::PegFieldTooWide { max: MAX_ROW_PEGS })
        );
    }

    #[test]
    fn test_rejects_crowded_pegs() {
        // 19 pegs of radius 40 cannot fit side by side in 1400px
        let config = BoardConfig {
            peg_radius: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PegsOverlap { peg_radius, .. }) if peg_radius == 40.0
        ));
    }

    #[test]
    fn test_rejects_non_positive_gravity() {
        for gravity in [0.0, -0.3] {
            let mut config = BoardConfig::default();
            config.physics.gravity = gravity;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NotPositive { name: "gravity", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let config = BoardConfig {
            slot_height: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "slot_height" })
        );

        let config = BoardConfig {
            width: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "width" })
        );

        let mut config = BoardConfig::default();
        config.physics.collision_jitter = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "collision_jitter" })
        );

        let mut config = BoardConfig::default();
        config.multipliers[9] = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { name: "multipliers" })
        );
    }

    #[test]
    fn test_partial_json_override() {
        let config = BoardConfig::from_json(r#"{"rows": 8, "physics": {"gravity": 0.5}}"#)
            .expect("valid json");
        assert_eq!(config.rows, 8);
        assert_eq!(config.physics.gravity, 0.5);
        assert_eq!(config.physics.bounce_damping, BOUNCE_DAMPING);
        assert_eq!(config.width, BOARD_WIDTH);
    }
}
