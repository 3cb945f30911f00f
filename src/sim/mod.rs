//! Board simulation module
//!
//! All gameplay physics lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One step per frame, no wall-clock input
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (balls by id, pegs by generation order)

pub mod ball;
pub mod board;
pub mod collision;
pub mod config;
pub mod pegs;
pub mod rng;
pub mod slots;

pub use ball::{Ball, BallState};
pub use board::Board;
pub use collision::{reflect_velocity, resolve_peg_collision, resolve_wall_collision};
pub use config::{BoardConfig, ConfigError, PhysicsConstants};
pub use pegs::{Peg, generate_pegs};
pub use rng::{FixedRandom, RandomSource, SeededRandom};
pub use slots::{Landing, resolve_landing, slot_index};
