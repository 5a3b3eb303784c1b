//! Parallax scenery layers (clouds, buildings, trees, ground)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Kinematic;
use crate::config::{GameConfig, LayerConfig};

/// Which scenery layer a row of tiles belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Clouds,
    Buildings,
    Trees,
    Ground,
}

/// A row of tiles scrolling at one speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    pub tiles: Vec<Kinematic>,
    /// Velocity restored after a freeze
    pub nominal_vel: Vec2,
}

impl Layer {
    /// Tiles laid edge to edge from x = 0 at height `y`
    pub fn new(kind: LayerKind, cfg: &LayerConfig, y: f32) -> Self {
        let tiles = (0..cfg.count)
            .map(|i| Kinematic::new(Vec2::new(cfg.size.x * i as f32, y), cfg.velocity, cfg.size))
            .collect();
        Self {
            kind,
            tiles,
            nominal_vel: cfg.velocity,
        }
    }

    /// Length of the whole row
    fn span(&self) -> f32 {
        self.tiles
            .first()
            .map(|t| t.size.x * self.tiles.len() as f32)
            .unwrap_or(0.0)
    }

    pub fn advance(&mut self, dt: f32) {
        for tile in &mut self.tiles {
            tile.advance(dt);
        }
    }

    /// Move tiles that scrolled off the left edge to the back of the row
    pub fn recycle(&mut self) {
        let span = self.span();
        for tile in &mut self.tiles {
            if tile.is_off_left() {
                tile.pos.x += span;
            }
        }
    }

    pub fn freeze(&mut self) {
        for tile in &mut self.tiles {
            tile.freeze();
        }
    }

    pub fn resume(&mut self) {
        for tile in &mut self.tiles {
            tile.resume(self.nominal_vel);
        }
    }
}

/// All scenery layers in painter order (back to front)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenery {
    pub layers: Vec<Layer>,
}

impl Scenery {
    /// Stack the layers upward from the bottom of the screen
    pub fn new(config: &GameConfig) -> Self {
        let screen_h = config.screen_size.y;
        let ground_y = screen_h - config.ground.size.y;
        let trees_y = ground_y - config.trees.size.y;
        let buildings_y = trees_y - config.buildings.size.y + 10.0;
        let clouds_y = trees_y - config.buildings.size.y - 20.0;

        Self {
            layers: vec![
                Layer::new(LayerKind::Clouds, &config.clouds, clouds_y),
                Layer::new(LayerKind::Buildings, &config.buildings, buildings_y),
                Layer::new(LayerKind::Trees, &config.trees, trees_y),
                Layer::new(LayerKind::Ground, &config.ground, ground_y),
            ],
        }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn advance(&mut self, dt: f32) {
        self.layers.iter_mut().for_each(|l| l.advance(dt));
    }

    pub fn recycle(&mut self) {
        self.layers.iter_mut().for_each(Layer::recycle);
    }

    pub fn freeze(&mut self) {
        self.layers.iter_mut().for_each(Layer::freeze);
    }

    pub fn resume(&mut self) {
        self.layers.iter_mut().for_each(Layer::resume);
    }
}
