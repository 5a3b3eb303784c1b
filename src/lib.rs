//! Flappy - a side-scrolling arcade game with a neuro-evolution training mode
//!
//! Core modules:
//! - `sim`: Simulation (bird, pipe cycle, scenery, collisions, game state)
//! - `config`: Externally supplied tuning with validation
//! - `renderer`: Drawing boundary (surface trait + recording draw list)
//! - `neuro`: Default evolutionary harness for training mode
//! - `logging`: Logger setup for the binary

pub mod config;
pub mod logging;
pub mod neuro;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Behavioral constants of the core (not tunable through config)
pub mod consts {
    /// Seconds the dead tableau is held before the game resets
    pub const DEATH_RESET_DELAY: f32 = 3.0;

    /// Fitness gained by every bird that survives a training tick
    pub const SURVIVAL_REWARD: f32 = 10.0;
    /// Fitness lost by a bird on collision
    pub const COLLISION_PENALTY: f32 = 50.0;
    /// Controller output above this triggers a jump
    pub const JUMP_THRESHOLD: f32 = 0.5;

    /// Number of values in a training observation
    pub const OBSERVATION_SIZE: usize = 5;
    /// Training moves the scoring cursor this many pixels before the pipe's trailing edge
    pub const TRAINING_CURSOR_LEAD: f32 = 10.0;
}

/// Axis-aligned extent of a `size` rectangle rotated by `angle_deg`
#[inline]
pub fn rotated_extent(size: Vec2, angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
