//! Game state and the shared world
//!
//! `World` is what every mode shares (pipes, scenery, the gap RNG).
//! `GameState` adds the single-player bird, score and death/reset phase.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::collision::{hits_bounds, hits_obstacles};
use super::cycle::PipeCycle;
use super::scenery::Scenery;
use crate::config::GameConfig;
use crate::consts::DEATH_RESET_DELAY;

/// Current phase of single-player gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Bird flying, world scrolling
    Alive,
    /// Frozen tableau waiting for the reset delay
    Dead,
}

/// Pipes, scenery and the single generator behind every gap
#[derive(Debug, Clone)]
pub struct World {
    pub cycle: PipeCycle,
    pub scenery: Scenery,
    rng: Pcg32,
}

impl World {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let cycle = PipeCycle::new(config, &mut rng);
        Self {
            cycle,
            scenery: Scenery::new(config),
            rng,
        }
    }

    /// Wrap scenery tiles and pipe pairs that left the screen
    pub fn recycle(&mut self, config: &GameConfig) {
        self.scenery.recycle();
        self.cycle.recycle(config, &mut self.rng);
    }

    /// Scroll everything by its current velocity
    pub fn advance(&mut self, dt: f32) {
        self.scenery.advance(dt);
        self.cycle.advance(dt);
    }

    /// Scroll by `dt` then wrap whatever left the screen
    ///
    /// Training splits this into `recycle` and `advance` so collisions are
    /// tested against pipes that have not moved yet this tick.
    pub fn tick(&mut self, config: &GameConfig, dt: f32) {
        self.scenery.advance(dt);
        self.scenery.recycle();
        self.cycle.tick(config, &mut self.rng, dt);
    }

    /// Stop all scrolling
    pub fn freeze(&mut self) {
        self.scenery.freeze();
        self.cycle.freeze();
    }

    /// Restart scrolling at nominal velocities
    pub fn resume(&mut self, config: &GameConfig) {
        self.scenery.resume();
        self.cycle.resume(config);
    }

    /// Put the pipes back at their spawn layout with fresh gaps
    pub fn relayout(&mut self, config: &GameConfig) {
        self.cycle.relayout(config, &mut self.rng);
    }
}

/// Complete single-player state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Seconds spent dead
    pub death_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub bird: Bird,
    pub world: World,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let bird = Bird::new(&config);
        let world = World::new(&config, seed);
        Self {
            config,
            seed,
            phase: GamePhase::Alive,
            score: 0,
            death_timer: 0.0,
            time_ticks: 0,
            bird,
            world,
        }
    }

    /// Index of the pipe pair being evaluated for scoring
    #[inline]
    pub fn scoring_index(&self) -> usize {
        self.world.cycle.cursor
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.phase == GamePhase::Dead
    }

    /// True if the bird hit a pipe, the ceiling or the floor
    pub fn bird_collided(&self) -> bool {
        hits_obstacles(&self.bird, &self.world.cycle) || hits_bounds(&self.bird, &self.config)
    }

    /// Alive -> Dead: stop the bird once and freeze the world
    pub fn kill(&mut self) {
        if self.is_dead() {
            return;
        }
        self.bird.body.vel.y = 0.0;
        self.world.freeze();
        self.death_timer = 0.0;
        self.phase = GamePhase::Dead;
        log::info!("Bird died with score {}", self.score);
    }

    /// Dead -> Alive: fresh bird, fresh pipes, zero score
    pub fn reset(&mut self) {
        self.score = 0;
        self.death_timer = 0.0;
        self.bird.reset(&self.config);
        self.world.relayout(&self.config);
        self.world.resume(&self.config);
        self.phase = GamePhase::Alive;
        log::debug!("Game reset");
    }

    /// Accumulate dead time; returns true if this call performed the reset
    pub fn advance_death_timer(&mut self, dt: f32) -> bool {
        self.death_timer += dt;
        if self.death_timer >= DEATH_RESET_DELAY {
            self.reset();
            return true;
        }
        false
    }

    /// Score one point if the bird passed the current pair's trailing edge
    pub fn update_score(&mut self) -> bool {
        let passed = self
            .world
            .cycle
            .advance_scoring_cursor(self.bird.pos().x, 0.0);
        if passed {
            self.score += 1;
            log::debug!("Score {}", self.score);
        }
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_state() {
        let state = GameState::new(GameConfig::default(), 5);
        assert_eq!(state.phase, GamePhase::Alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.scoring_index(), 0);
        assert!(!state.bird_collided());
    }

    #[test]
    fn test_update_score_past_trailing_edge() {
        let mut state = GameState::new(GameConfig::default(), 5);
        let pair = state.world.cycle.current_pair().unwrap();
        state.bird.body.pos.x = pair.x() + state.config.pipe_size.x + 1.0;

        assert!(state.update_score());
        assert_eq!(state.score, 1);
        assert_eq!(state.scoring_index(), 1);
    }

    #[test]
    fn test_update_score_without_pipes() {
        let config = GameConfig {
            pipe_count: 0,
            ..Default::default()
        };
        let mut state = GameState::new(config, 5);
        state.bird.body.pos.x = 1e6;
        assert!(!state.update_score());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_kill_freezes_world_once() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.bird.body.vel.y = 300.0;
        state.kill();
        assert!(state.is_dead());
        assert_eq!(state.bird.velocity_y(), 0.0);
        assert!(state
            .world
            .cycle
            .pairs
            .iter()
            .all(|p| p.top.vel == Vec2::ZERO));

        state.death_timer = 1.0;
        state.kill();
        assert_eq!(state.death_timer, 1.0);
    }

    #[test]
    fn test_world_tick_scrolls_and_wraps() {
        let config = GameConfig::default();
        let mut world = World::new(&config, 5);
        let x1 = world.cycle.pairs[1].x();
        world.cycle.pairs[0].set_x(-config.pipe_size.x + 1.0);

        world.tick(&config, 0.5);
        // 100 px of scrolling pushes pair 0 off the left edge and back around
        assert_eq!(world.cycle.pairs[1].x(), x1 - 100.0);
        assert_eq!(
            world.cycle.pairs[0].x(),
            -config.pipe_size.x + 1.0 - 100.0 + config.pipe_cycle_length()
        );
        for layer in &world.scenery.layers {
            assert!(layer.tiles.iter().all(|t| t.right() >= 0.0));
        }
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.score = 7;
        state.world.cycle.cursor = 2;
        state.bird.body.pos = Vec2::new(100.0, 640.0);
        state.bird.angle = 90.0;
        state.kill();

        state.reset();
        assert_eq!(state.phase, GamePhase::Alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.scoring_index(), 0);
        assert_eq!(state.bird.pos(), state.config.bird_start);
        assert_eq!(state.bird.angle, state.config.bird_start_angle);
        for (i, pair) in state.world.cycle.pairs.iter().enumerate() {
            assert_eq!(pair.x(), crate::sim::PipePair::spawn_x(&state.config, i));
            assert_eq!(pair.top.vel, state.config.pipe_velocity);
        }
    }
}
