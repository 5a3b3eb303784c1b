//! Idle/demo mode: a simple rule that plays the game

use super::bird::Bird;
use super::cycle::PipeCycle;
use crate::config::GameConfig;

/// Pixels kept between the bird's lower edge and the bottom pipe
const SAFETY_MARGIN: f32 = 12.0;

/// Flap when the bird's (tilted) box sinks toward the lower lip of the
/// upcoming gap
///
/// Without pipes the bird holds the middle of the playable area.
pub fn should_jump(bird: &Bird, cycle: &PipeCycle, config: &GameConfig) -> bool {
    let floor_line = match cycle.current_pair() {
        Some(pair) => pair.gap_bottom() - SAFETY_MARGIN,
        None => config.playable_height() / 2.0 + config.bird_size.y,
    };
    let falling = bird.velocity_y() >= 0.0;
    falling && bird.bounds().max().y > floor_line
}
