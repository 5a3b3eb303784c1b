//! Sprite instance records for an external GPU surface

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Logical sprite names resolved by the asset provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Clouds,
    Buildings,
    Trees,
    Ground,
    Pipe,
    Bird { frame: usize },
}

impl Sprite {
    /// Stable numeric id for instance buffers
    pub fn id(self) -> u32 {
        match self {
            Sprite::Background => 0,
            Sprite::Clouds => 1,
            Sprite::Buildings => 2,
            Sprite::Trees => 3,
            Sprite::Ground => 4,
            Sprite::Pipe => 5,
            Sprite::Bird { .. } => 6,
        }
    }

    /// Animation frame (0 for still sprites)
    pub fn frame(self) -> u32 {
        match self {
            Sprite::Bird { frame } => frame as u32,
            _ => 0,
        }
    }
}

/// One sprite draw: top-left position, size, rotation and sprite id
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Counter-clockwise degrees
    pub angle: f32,
    pub sprite: u32,
    pub frame: u32,
}

impl SpriteInstance {
    pub fn new(sprite: Sprite, pos: Vec2, size: Vec2, angle: f32) -> Self {
        Self {
            position: pos.to_array(),
            size: size.to_array(),
            angle,
            sprite: sprite.id(),
            frame: sprite.frame(),
        }
    }
}
