//! Ball entity and integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::PhysicsConstants;

/// Ball lifecycle: falling until a slot is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Active; integrated and collided every step
    Falling,
    /// Terminal; the ball is removed from the board
    Landed { slot: usize },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            state: BallState::Falling,
        }
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == BallState::Falling
    }

    /// Advance one step (semi-implicit Euler)
    ///
    /// Velocity is updated first, then position moves by the new velocity.
    pub fn integrate(&mut self, physics: &PhysicsConstants) {
        if !self.is_falling() {
            return;
        }
        self.vel.y += physics.gravity;
        self.vel.x *= physics.horizontal_damping;
        self.pos += self.vel;
    }
}
