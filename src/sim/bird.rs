//! The player-controlled bird

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Kinematic};
use crate::config::GameConfig;
use crate::rotated_extent;

/// The flying entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Position and base sprite size; only the vertical velocity is used
    pub body: Kinematic,
    /// Nose-down angle in degrees (negative is nose up)
    pub angle: f32,
    /// Current animation frame
    pub frame: usize,
    /// Seconds since the last frame change
    pub anim_timer: f32,
    /// Cleared when the bird is eliminated
    pub alive: bool,
    /// Extent of the rotated sprite; base size until the first angle update
    pub hitbox_size: Vec2,
}

impl Bird {
    /// Spawn at the configured start position
    pub fn new(config: &GameConfig) -> Self {
        Self {
            body: Kinematic::new(config.bird_start, Vec2::ZERO, config.bird_size),
            angle: config.bird_start_angle,
            frame: 0,
            anim_timer: 0.0,
            alive: true,
            hitbox_size: config.bird_size,
        }
    }

    /// Back to the spawn state
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn velocity_y(&self) -> f32 {
        self.body.vel.y
    }

    /// Accelerate downward, then move
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.body.vel.y += gravity * dt;
        self.body.pos.y += self.body.vel.y * dt;
    }

    /// Flap: fixed upward speed and nose back up
    pub fn jump(&mut self, config: &GameConfig) {
        self.angle = config.bird_start_angle;
        self.body.vel.y = -config.jump_impulse;
    }

    /// Rotate nose-down over time and refresh the rotated hitbox
    pub fn apply_angle(&mut self, config: &GameConfig, dt: f32) {
        self.angle = (self.angle + config.angular_speed * dt).min(config.max_tilt);
        self.hitbox_size = rotated_extent(self.body.size, self.draw_angle());
    }

    /// Cycle animation frames
    pub fn animate(&mut self, config: &GameConfig, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer > config.animation_interval {
            self.anim_timer = 0.0;
            self.frame = (self.frame + 1) % config.animation_frames;
        }
    }

    /// Rotation handed to the renderer (counter-clockwise degrees)
    #[inline]
    pub fn draw_angle(&self) -> f32 {
        -self.angle
    }

    /// Collision box, recomputed from the current rotated extent
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.body.pos, self.hitbox_size)
    }
}
