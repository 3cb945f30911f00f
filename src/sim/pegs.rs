//! Peg field generation
//!
//! The field is a widening triangle: row `r` holds `first_row_pegs + r` pegs,
//! each row centred on the board. Since every row gains exactly one peg,
//! neighbouring rows sit half a spacing apart (zigzag) and the whole field is
//! mirror-symmetric about the vertical centre line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::BoardConfig;

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

/// Horizontal distance between neighbouring pegs in a row
#[inline]
pub fn peg_spacing(config: &BoardConfig) -> f32 {
    config.width / config.last_row_pegs().saturating_add(1) as f32
}

/// Vertical distance between peg rows
#[inline]
pub fn row_gap(config: &BoardConfig) -> f32 {
    (config.slot_top() - config.top_margin) / config.rows.max(1) as f32
}

/// Build the peg field for a configuration (pure, deterministic)
///
/// Pegs are ordered row by row, left to right. Pegs whose centre would fall
/// outside `[peg_radius, width - peg_radius]` are dropped.
pub fn generate_pegs(config: &BoardConfig) -> Vec<Peg> {
    let spacing = peg_spacing(config);
    let gap = row_gap(config);
    let center_x = config.width / 2.0;
    let min_x = config.peg_radius;
    let max_x = config.width - config.peg_radius;

    let mut pegs = Vec::new();
    for row in 0..config.rows {
        let count = config.first_row_pegs.saturating_add(row);
        if count == 0 {
            continue;
        }
        let y = config.top_margin + row as f32 * gap;
        let half_span = (count - 1) as f32 / 2.0;

        for i in 0..count {
            let x = center_x + (i as f32 - half_span) * spacing;
            if x < min_x || x > max_x {
                continue;
            }
            pegs.push(Peg {
                pos: Vec2::new(x, y),
                radius: config.peg_radius,
            });
        }
    }
    pegs
}
