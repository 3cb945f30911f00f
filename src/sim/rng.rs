//! Injectable randomness
//!
//! Spawn velocity and bounce noise draw from a `RandomSource` owned by the
//! board, so a fixed source makes every trajectory reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples for the simulation
pub trait RandomSource {
    /// Uniform sample in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in [-half_width, half_width)
    fn symmetric(&mut self, half_width: f32) -> f32 {
        (self.next_unit() * 2.0 - 1.0) * half_width
    }
}

/// Seeded PCG stream (default source)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Always returns the same sample; 0.5 yields zero noise
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}
