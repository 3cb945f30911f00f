//! Collision detection and response
//!
//! Ball-vs-peg is circle-vs-circle; ball-vs-wall only looks at the left and
//! right edges of the play area (the bottom is handled by slot resolution).

use glam::Vec2;

use super::ball::Ball;
use super::config::PhysicsConstants;
use super::pegs::Peg;
use super::rng::RandomSource;
use crate::consts::NORMAL_EPSILON;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Resolve one ball against one peg
///
/// On overlap the ball is pushed out along the collision normal until it just
/// touches the peg, its velocity is reflected and damped, and a uniform kick
/// is added to vx. Returns whether a collision was resolved. Centres closer
/// than `NORMAL_EPSILON` have no usable normal and are skipped.
pub fn resolve_peg_collision<R: RandomSource + ?Sized>(
    ball: &mut Ball,
    peg: &Peg,
    physics: &PhysicsConstants,
    rng: &mut R,
) -> bool {
    let delta = ball.pos - peg.pos;
    let dist = delta.length();
    let min_dist = ball.radius + peg.radius;

    if dist >= min_dist || dist < NORMAL_EPSILON {
        return false;
    }

    let normal = delta / dist;
    ball.pos = peg.pos + normal * min_dist;
    ball.vel = reflect_velocity(ball.vel, normal) * physics.bounce_damping;
    ball.vel.x += rng.symmetric(physics.collision_jitter);
    true
}

/// Keep the ball inside the horizontal play area
///
/// Crossing an edge clamps the ball against it and bounces vx back with the
/// same damping as a peg hit. Returns whether a wall was hit.
pub fn resolve_wall_collision(ball: &mut Ball, width: f32, physics: &PhysicsConstants) -> bool {
    if ball.pos.x - ball.radius < 0.0 {
        ball.pos.x = ball.radius;
    } else if ball.pos.x + ball.radius > width {
        ball.pos.x = width - ball.radius;
    } else {
        return false;
    }
    ball.vel.x = -ball.vel.x * physics.bounce_damping;
    true
}
