//! Kinematic entities shared by pipes, scenery and the bird body

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Something that moves at a constant velocity between explicit changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematic {
    /// Top-left corner (screen pixels, y grows downward)
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Sprite width and height
    pub size: Vec2,
}

impl Kinematic {
    pub const fn new(pos: Vec2, vel: Vec2, size: Vec2) -> Self {
        Self { pos, vel, size }
    }

    /// Integrate position over `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Stop moving (the death tableau)
    #[inline]
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Restore a nominal velocity
    #[inline]
    pub fn resume(&mut self, nominal: Vec2) {
        self.vel = nominal;
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True once the trailing edge has crossed the left screen boundary
    #[inline]
    pub fn is_off_left(&self) -> bool {
        self.right() < 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
