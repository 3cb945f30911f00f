//! Scene building: board state to a flat list of 2D primitives
//!
//! A pure read of the board. Painters (canvas, tests) consume the `Scene`
//! without ever touching simulation state.

use glam::Vec2;

use crate::sim::{Board, RandomSource};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

pub const PEG_COLOR: Color = [0.85, 0.88, 0.95, 1.0];
pub const BALL_COLOR: Color = [1.0, 0.35, 0.45, 1.0];
pub const BACKGROUND_COLOR: Color = [0.05, 0.06, 0.12, 1.0];

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled circle (pegs)
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// A ball in flight, painted in `BALL_COLOR`
    Ball { center: Vec2, radius: f32 },
    /// Landing slot cell with its multiplier label
    Slot {
        origin: Vec2,
        size: Vec2,
        color: Color,
        label: String,
    },
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Back to front: slots, pegs, balls
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn ball_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Ball { .. }))
            .count()
    }
}

/// Slot colour by payout: losses red, break-even grey, wins green to gold
pub fn multiplier_color(multiplier: f32, max_multiplier: f32) -> Color {
    if multiplier < 0.0 {
        return [0.75, 0.2, 0.25, 1.0];
    }
    if multiplier == 0.0 {
        return [0.35, 0.37, 0.42, 1.0];
    }
    let t = if max_multiplier > 0.0 {
        (multiplier / max_multiplier).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // Green (small win) -> gold (jackpot)
    [0.2 + 0.8 * t, 0.75 + 0.05 * t, 0.35 - 0.2 * t, 1.0]
}

/// Slot label, e.g. "10x", "1.25x", "-0.5x"
pub fn multiplier_label(multiplier: f32) -> String {
    format!("{}x", multiplier)
}

/// CSS colour string for a canvas fill style
pub fn css_color(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}

/// Build the frame's primitives from the board
pub fn build_scene<R: RandomSource>(board: &Board<R>) -> Scene {
    let config = board.config();
    let slot_width = config.slot_width();
    let slot_top = config.slot_top();
    let max_multiplier = config
        .multipliers
        .iter()
        .copied()
        .fold(0.0_f32, f32::max);

    let mut shapes =
        Vec::with_capacity(config.slot_count() + board.pegs().len() + board.active_count());

    for (i, &multiplier) in config.multipliers.iter().enumerate() {
        shapes.push(Shape::Slot {
            origin: Vec2::new(i as f32 * slot_width, slot_top),
            size: Vec2::new(slot_width, config.slot_height),
            color: multiplier_color(multiplier, max_multiplier),
            label: multiplier_label(multiplier),
        });
    }

    shapes.extend(board.pegs().iter().map(|peg| Shape::Circle {
        center: peg.pos,
        radius: peg.radius,
        color: PEG_COLOR,
    }));

    shapes.extend(board.balls().iter().map(|ball| Shape::Ball {
        center: ball.pos,
        radius: ball.radius,
    }));

    Scene {
        width: config.width,
        height: config.height,
        shapes,
    }
}
