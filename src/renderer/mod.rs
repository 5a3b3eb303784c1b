//! Drawing boundary
//!
//! The core owns no pixels. Each frame it walks the state and hands one
//! call per entity to a `RenderSurface`, back to front.

pub mod vertex;

pub use vertex::{Sprite, SpriteInstance};

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::{Bird, GameState, LayerKind, TrainingRun, World};

/// Anything that can blit sprites and text
pub trait RenderSurface {
    /// Draw `sprite` with its top-left corner at `pos`
    fn draw(&mut self, sprite: Sprite, pos: Vec2, size: Vec2);
    /// Draw `sprite` rotated counter-clockwise by `angle_deg`
    fn draw_rotated(&mut self, sprite: Sprite, pos: Vec2, size: Vec2, angle_deg: f32);
    /// Draw `text` centred on `center`
    fn draw_text(&mut self, text: &str, center: Vec2, size: f32);
}

/// A queued text draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub center: Vec2,
    pub size: f32,
}

/// Surface that records draws for later upload
#[derive(Debug, Default)]
pub struct DrawList {
    pub instances: Vec<SpriteInstance>,
    pub texts: Vec<TextItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.texts.clear();
    }

    /// Instance buffer contents, ready for a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Count of instances using `sprite`'s id
    pub fn count(&self, sprite: Sprite) -> usize {
        self.instances
            .iter()
            .filter(|i| i.sprite == sprite.id())
            .count()
    }
}

impl RenderSurface for DrawList {
    fn draw(&mut self, sprite: Sprite, pos: Vec2, size: Vec2) {
        self.instances.push(SpriteInstance::new(sprite, pos, size, 0.0));
    }

    fn draw_rotated(&mut self, sprite: Sprite, pos: Vec2, size: Vec2, angle_deg: f32) {
        self.instances
            .push(SpriteInstance::new(sprite, pos, size, angle_deg));
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32) {
        self.texts.push(TextItem {
            text: text.to_string(),
            center,
            size,
        });
    }
}

fn layer_sprite(kind: LayerKind) -> Sprite {
    match kind {
        LayerKind::Clouds => Sprite::Clouds,
        LayerKind::Buildings => Sprite::Buildings,
        LayerKind::Trees => Sprite::Trees,
        LayerKind::Ground => Sprite::Ground,
    }
}

/// Background, far scenery and pipes
fn draw_world_back(world: &World, config: &GameConfig, surface: &mut impl RenderSurface) {
    surface.draw(Sprite::Background, Vec2::ZERO, config.screen_size);

    for layer in world
        .scenery
        .layers
        .iter()
        .filter(|l| l.kind != LayerKind::Ground)
    {
        for tile in &layer.tiles {
            surface.draw(layer_sprite(layer.kind), tile.pos, tile.size);
        }
    }

    for pair in &world.cycle.pairs {
        surface.draw(Sprite::Pipe, pair.bottom.pos, pair.bottom.size);
        surface.draw_rotated(Sprite::Pipe, pair.top.pos, pair.top.size, 180.0);
    }
}

/// Ground drawn over the birds
fn draw_world_front(world: &World, surface: &mut impl RenderSurface) {
    if let Some(ground) = world.scenery.layer(LayerKind::Ground) {
        for tile in &ground.tiles {
            surface.draw(Sprite::Ground, tile.pos, tile.size);
        }
    }
}

fn draw_bird(bird: &Bird, surface: &mut impl RenderSurface) {
    surface.draw_rotated(
        Sprite::Bird { frame: bird.frame },
        bird.pos(),
        bird.body.size,
        bird.draw_angle(),
    );
}

/// One single-player frame
pub fn draw_game(state: &GameState, surface: &mut impl RenderSurface) {
    let config = &state.config;
    draw_world_back(&state.world, config, surface);
    draw_bird(&state.bird, surface);
    draw_world_front(&state.world, surface);

    if config.pipe_count > 0 {
        surface.draw_text(
            &state.score.to_string(),
            Vec2::new(config.screen_size.x / 2.0, 100.0),
            70.0,
        );
    }
}

/// One training frame: every live bird plus population stats
pub fn draw_training(run: &TrainingRun, surface: &mut impl RenderSurface) {
    let config = &run.config;
    draw_world_back(&run.world, config, surface);
    for contestant in &run.roster {
        draw_bird(&contestant.bird, surface);
    }
    draw_world_front(&run.world, surface);

    let x = config.screen_size.x / 2.0;
    surface.draw_text(&format!("Individuals:{}", run.alive()), Vec2::new(x, 30.0), 30.0);
    surface.draw_text(&format!("Generation:{}", run.generation), Vec2::new(x, 60.0), 30.0);
}
