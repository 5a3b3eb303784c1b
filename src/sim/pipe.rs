//! Pipe pairs and the gap policy

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Kinematic};
use crate::config::GameConfig;

/// Draw a gap centre uniformly in `[mid - jitter, mid + jitter]`
///
/// This is the only source of vertical randomness, used for both the
/// initial layout and every recycle.
pub fn spawn_gap(rng: &mut impl Rng, mid: i32, jitter: i32) -> i32 {
    rng.random_range(mid - jitter..=mid + jitter)
}

/// A top and a bottom pipe with an opening between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub top: Kinematic,
    pub bottom: Kinematic,
    /// Vertical centre of the opening
    pub gap_center: f32,
    /// Half the opening height
    pub half_gap: f32,
}

impl PipePair {
    /// Build a pair at `x` around `gap_center`
    pub fn new(config: &GameConfig, x: f32, gap_center: f32) -> Self {
        let half_gap = config.half_gap();
        let top = Kinematic::new(
            Vec2::new(x, gap_center - half_gap - config.pipe_size.y),
            config.pipe_velocity,
            config.pipe_size,
        );
        let bottom = Kinematic::new(
            Vec2::new(x, gap_center + half_gap),
            config.pipe_velocity,
            config.pipe_size,
        );
        Self {
            top,
            bottom,
            gap_center,
            half_gap,
        }
    }

    /// Spawn x for pair `index` in the initial layout
    pub fn spawn_x(config: &GameConfig, index: usize) -> f32 {
        let n = (index + 1) as f32;
        config.screen_size.x + config.pipe_size.x * n + config.pipe_spacing * n
    }

    /// Shared horizontal position
    #[inline]
    pub fn x(&self) -> f32 {
        self.top.pos.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.top.size.x
    }

    /// Move both pipes by their shared velocity
    pub fn advance(&mut self, dt: f32) {
        self.top.advance(dt);
        self.bottom.pos.x = self.top.pos.x;
        self.bottom.pos.y += self.bottom.vel.y * dt;
    }

    /// Re-centre the opening, keeping the horizontal position
    pub fn set_gap(&mut self, gap_center: f32) {
        self.gap_center = gap_center;
        self.top.pos.y = gap_center - self.half_gap - self.top.size.y;
        self.bottom.pos.y = gap_center + self.half_gap;
    }

    /// Move both pipes horizontally
    pub fn set_x(&mut self, x: f32) {
        self.top.pos.x = x;
        self.bottom.pos.x = x;
    }

    /// Lower edge of the top pipe
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.top.bottom()
    }

    /// Upper edge of the bottom pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.bottom.pos.y
    }

    pub fn freeze(&mut self) {
        self.top.freeze();
        self.bottom.freeze();
    }

    pub fn resume(&mut self, nominal: Vec2) {
        self.top.resume(nominal);
        self.bottom.resume(nominal);
    }

    /// Collision boxes for both pipes
    pub fn bounds(&self) -> [Aabb; 2] {
        [self.top.bounds(), self.bottom.bounds()]
    }
}
