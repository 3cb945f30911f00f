//! Board session state and the per-step update
//!
//! One `Board` per game session. It owns the configuration, the peg field,
//! every ball in flight, the entity id counter and the random source; nothing
//! outside mutates a ball directly.

use glam::Vec2;

use super::ball::Ball;
use super::collision::{resolve_peg_collision, resolve_wall_collision};
use super::config::{BoardConfig, ConfigError};
use super::pegs::{Peg, generate_pegs};
use super::rng::{RandomSource, SeededRandom};
use super::slots::{Landing, resolve_landing};

/// A Plinko board session
#[derive(Debug, Clone)]
pub struct Board<R = SeededRandom> {
    config: BoardConfig,
    /// Generated once, never mutated
    pegs: Vec<Peg>,
    /// Falling balls, ascending id
    balls: Vec<Ball>,
    next_id: u32,
    time_steps: u64,
    rng: R,
}

impl Board<SeededRandom> {
    /// Board with the default seeded PCG source
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Board<R> {
    /// Validate the configuration and lay out the peg field
    pub fn new(config: BoardConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let pegs = generate_pegs(&config);
        log::info!(
            "Board ready: {}x{}, {} pegs, {} slots",
            config.width,
            config.height,
            pegs.len(),
            config.slot_count()
        );
        Ok(Self {
            config,
            pegs,
            balls: Vec::new(),
            next_id: 1,
            time_steps: 0,
            rng,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// Balls currently falling
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn active_count(&self) -> usize {
        self.balls.len()
    }

    #[cfg(test)]
    pub(crate) fn balls_mut(&mut self) -> &mut Vec<Ball> {
        &mut self.balls
    }

    /// Steps simulated since the board was built
    pub fn time_steps(&self) -> u64 {
        self.time_steps
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball at the top centre with a small random sideways drift
    pub fn drop_ball(&mut self) -> u32 {
        let id = self.next_entity_id();
        let pos = Vec2::new(self.config.width / 2.0, self.config.spawn_y);
        let vel = Vec2::new(self.rng.symmetric(self.config.spawn_jitter), 0.0);
        self.balls
            .push(Ball::new(id, pos, vel, self.config.ball_radius));
        id
    }

    /// Integrate every falling ball, then resolve its peg and wall contacts
    pub fn advance(&mut self) {
        let physics = &self.config.physics;
        for ball in &mut self.balls {
            if !ball.is_falling() {
                continue;
            }
            ball.integrate(physics);
            for peg in &self.pegs {
                resolve_peg_collision(ball, peg, physics, &mut self.rng);
            }
            resolve_wall_collision(ball, self.config.width, physics);
        }
    }

    /// Report and remove every ball that reached the slot strip
    ///
    /// Returns the number of landings reported.
    pub fn resolve_landings<F: FnMut(Landing)>(&mut self, mut on_landed: F) -> usize {
        let mut landed = 0;
        for ball in &mut self.balls {
            if let Some(landing) = resolve_landing(ball, &self.config) {
                log::debug!(
                    "Ball {} landed in slot {} (x{})",
                    landing.ball_id,
                    landing.slot,
                    landing.multiplier
                );
                on_landed(landing);
                landed += 1;
            }
        }
        self.balls.retain(Ball::is_falling);
        landed
    }

    /// Advance the board by one frame: physics first, then landings
    pub fn step<F: FnMut(Landing)>(&mut self, on_landed: F) {
        self.time_steps += 1;
        self.advance();
        self.resolve_landings(on_landed);
    }

    /// `step`, collecting the landings instead of using a callback
    pub fn step_collect(&mut self) -> Vec<Landing> {
        let mut landings = Vec::new();
        self.step(|landing| landings.push(landing));
        landings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::BallState;
    use crate::sim::rng::FixedRandom;

    fn still_board() -> Board<FixedRandom> {
        Board::new(BoardConfig::default(), FixedRandom(0.5)).expect("default config is valid")
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig {
            multipliers: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            Board::with_seed(config, 1),
            Err(ConfigError::NoSlots)
        ));
    }

    #[test]
    fn test_oversized_peg_field_rejected() {
        let config = BoardConfig {
            first_row_pegs: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            Board::with_seed(config, 1),
            Err(ConfigError::PegFieldTooWide { .. })
        ));
    }

    #[test]
    fn test_drop_spawns_at_centre() {
        let mut board = Board::with_seed(BoardConfig::default(), 3).expect("valid");
        let first = board.drop_ball();
        let second = board.drop_ball();
        assert_eq!((first, second), (1, 2));

        let config = board.config().clone();
        for ball in board.balls() {
            assert_eq!(ball.pos, Vec2::new(config.width / 2.0, config.spawn_y));
            assert!(ball.vel.x.abs() <= config.spawn_jitter);
            assert_eq!(ball.vel.y, 0.0);
            assert_eq!(ball.state, BallState::Falling);
        }
    }

    #[test]
    fn test_free_fall_before_first_contact() {
        let mut board = still_board();
        board.drop_ball();
        let y0 = board.config().spawn_y;
        let gravity = board.config().physics.gravity;

        let steps = 25;
        for _ in 0..steps {
            assert!(board.step_collect().is_empty());
        }
        let n = steps as f32;
        let ball = &board.balls()[0];
        assert!((ball.pos.y - (y0 + gravity * n * (n + 1.0) / 2.0)).abs() < 1e-2);
        assert_eq!(ball.pos.x, 700.0);
    }

    #[test]
    fn test_left_boundary_bounce_within_step() {
        let mut board = still_board();
        board.balls.push(Ball::new(
            99,
            Vec2::new(10.0, 60.0),
            Vec2::new(-2.0, 0.0),
            10.0,
        ));
        board.step_collect();

        let physics = board.config().physics;
        let ball = &board.balls()[0];
        assert_eq!(ball.pos.x, ball.radius);
        let expected = 2.0 * physics.horizontal_damping * physics.bounce_damping;
        assert!((ball.vel.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_every_ball_lands_exactly_once() {
        let mut board = Board::with_seed(BoardConfig::default(), 2024).expect("valid");
        for _ in 0..40 {
            board.drop_ball();
        }

        let mut seen = Vec::new();
        for _ in 0..5000 {
            board.step(|landing| seen.push(landing));
            if board.active_count() == 0 {
                break;
            }
        }

        assert_eq!(board.active_count(), 0);
        assert_eq!(seen.len(), 40);
        let mut ids: Vec<u32> = seen.iter().map(|l| l.ball_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 40);
        for landing in &seen {
            assert!(landing.slot < board.config().slot_count());
            assert_eq!(landing.multiplier, board.config().multipliers[landing.slot]);
        }
    }

    #[test]
    fn test_landed_balls_are_removed() {
        let mut board = still_board();
        let slot_top = board.config().slot_top();
        board.balls.push(Ball::new(5, Vec2::new(30.0, slot_top - 0.1), Vec2::new(0.0, 2.0), 10.0));

        let landings = board.step_collect();
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].slot, 0);
        assert_eq!(landings[0].multiplier, 10.0);
        assert_eq!(board.active_count(), 0);

        assert!(board.step_collect().is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two boards with the same seed produce identical trajectories
        let mut a = Board::with_seed(BoardConfig::default(), 99999).expect("valid");
        let mut b = Board::with_seed(BoardConfig::default(), 99999).expect("valid");
        for _ in 0..5 {
            a.drop_ball();
            b.drop_ball();
        }
        for _ in 0..300 {
            assert_eq!(a.step_collect(), b.step_collect());
        }
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.time_steps(), 300);
    }
}
