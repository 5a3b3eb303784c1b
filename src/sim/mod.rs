//! Simulation module
//!
//! All gameplay logic lives here:
//! - Explicit time step passed in by the caller
//! - One seeded RNG per world, used only for pipe gaps
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod collision;
pub mod cycle;
pub mod entity;
pub mod pipe;
pub mod scenery;
pub mod state;
pub mod tick;
pub mod training;

pub use bird::Bird;
pub use collision::{hits_bounds, hits_ceiling, hits_floor, hits_obstacles};
pub use cycle::PipeCycle;
pub use entity::{Aabb, Kinematic};
pub use pipe::{PipePair, spawn_gap};
pub use scenery::{Layer, LayerKind, Scenery};
pub use state::{GamePhase, GameState, World};
pub use tick::{Key, TickInput, TickStatus, tick};
pub use training::{
    Controller, EvolutionHarness, GenerationReport, Observation, TrainingRun, TrainingStatus,
    train,
};
