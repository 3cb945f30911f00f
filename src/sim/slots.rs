//! Slot resolution: continuous ball position to discrete game outcome

use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallState};
use super::config::BoardConfig;

/// Outcome of a ball reaching the slot strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub ball_id: u32,
    pub slot: usize,
    pub multiplier: f32,
}

impl Landing {
    /// Negative multipliers are losses
    pub fn is_loss(&self) -> bool {
        self.multiplier < 0.0
    }
}

/// Map an x coordinate to a slot index in `[0, slot_count)`
///
/// The board width is split into `slot_count` equal bins. Positions at or
/// beyond either edge (and NaN) clamp to the nearest valid slot.
pub fn slot_index(x: f32, config: &BoardConfig) -> usize {
    let count = config.slot_count();
    if count == 0 {
        return 0;
    }
    let bin = (x / config.slot_width()).floor();
    if bin.is_nan() || bin < 0.0 {
        0
    } else if bin >= (count - 1) as f32 {
        count - 1
    } else {
        bin as usize
    }
}

/// Resolve a landing if the ball has reached the slot strip
///
/// Only a falling ball can land, so calling this again on the same ball
/// returns `None`.
pub fn resolve_landing(ball: &mut Ball, config: &BoardConfig) -> Option<Landing> {
    if !ball.is_falling() || ball.pos.y <= config.slot_top() {
        return None;
    }
    let slot = slot_index(ball.pos.x, config);
    ball.state = BallState::Landed { slot };
    Some(Landing {
        ball_id: ball.id,
        slot,
        multiplier: config.multipliers[slot],
    })
}
