//! ARKlinko - Plinko board engine
//!
//! Core modules:
//! - `sim`: Board simulation (peg field, ball physics, collisions, slot landing)
//! - `driver`: Per-frame update-then-render loop
//! - `renderer`: Scene building and canvas painting
//! - `history`: Landing history and per-slot statistics
//! - `settings`: Persisted player preferences and board configuration

pub mod driver;
pub mod history;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::FrameLoop;
pub use history::LandingHistory;
pub use settings::Settings;
pub use sim::{Board, BoardConfig, ConfigError, Landing};

/// Board configuration constants
pub mod consts {
    /// Board dimensions (pixels)
    pub const BOARD_WIDTH: f32 = 1400.0;
    pub const BOARD_HEIGHT: f32 = 1000.0;

    /// Peg field: 14 rows growing from 6 to 19 pegs
    pub const PEG_ROWS: u32 = 14;
    pub const FIRST_ROW_PEGS: u32 = 6;
    pub const PEG_RADIUS: f32 = 6.0;
    /// Upper bound on the widest peg row a configuration may ask for
    pub const MAX_ROW_PEGS: u32 = 64;
    /// Space above the first peg row
    pub const TOP_MARGIN: f32 = 120.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const SPAWN_Y: f32 = 40.0;
    /// Initial horizontal velocity is drawn from ±SPAWN_JITTER
    pub const SPAWN_JITTER: f32 = 0.5;

    /// Height of the multiplier strip at the bottom of the board
    pub const SLOT_HEIGHT: f32 = 50.0;

    /// Gravity (pixels/step²)
    pub const GRAVITY: f32 = 0.3;
    /// Velocity kept after a peg or wall bounce
    pub const BOUNCE_DAMPING: f32 = 0.7;
    /// Horizontal velocity kept per step
    pub const HORIZONTAL_DAMPING: f32 = 0.98;
    /// Horizontal kick after a peg bounce is drawn from ±COLLISION_JITTER
    pub const COLLISION_JITTER: f32 = 0.25;

    /// Below this center distance a collision normal is undefined
    pub const NORMAL_EPSILON: f32 = 1e-4;

    /// Canonical payout table (negative = loss)
    pub const MULTIPLIERS: [f32; 19] = [
        10.0, 5.0, 4.0, 3.0, 2.0, -0.5, 1.5, 1.25, 0.0, -1.0, 0.0, 1.25, 1.5, -0.5, 2.0, 3.0,
        4.0, 5.0, 10.0,
    ];
}
