//! Collision and boundary queries
//!
//! Pure functions: they report, the caller decides what a hit means.
//! The bird's box depends on its tilt, so it is rebuilt on every query.

use super::bird::Bird;
use super::cycle::PipeCycle;
use crate::config::GameConfig;

/// True if the bird's box overlaps either pipe of any pair
pub fn hits_obstacles(bird: &Bird, cycle: &PipeCycle) -> bool {
    let bird_box = bird.bounds();
    cycle
        .pairs
        .iter()
        .any(|pair| pair.bounds().iter().any(|pipe| bird_box.intersects(pipe)))
}

/// True once the bird is above the top of the screen
#[inline]
pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.pos().y < 0.0
}

/// True once the bird's base sprite reaches into the ground
#[inline]
pub fn hits_floor(bird: &Bird, config: &GameConfig) -> bool {
    bird.pos().y + config.bird_size.y > config.playable_height()
}

/// Ceiling or floor
#[inline]
pub fn hits_bounds(bird: &Bird, config: &GameConfig) -> bool {
    hits_ceiling(bird) || hits_floor(bird, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameConfig, Bird, PipeCycle) {
        let config = GameConfig::default();
        let bird = Bird::new(&config);
        let cycle = PipeCycle::new(&config, &mut Pcg32::seed_from_u64(3));
        (config, bird, cycle)
    }

    #[test]
    fn test_ceiling_boundary() {
        let (_, mut bird, _) = setup();
        bird.body.pos.y = -1.0;
        assert!(hits_ceiling(&bird));
        bird.body.pos.y = 0.0;
        assert!(!hits_ceiling(&bird));
    }

    #[test]
    fn test_floor_boundary() {
        let (config, mut bird, _) = setup();
        let resting = config.screen_size.y - config.ground.size.y - config.bird_size.y;
        bird.body.pos.y = resting + 1.0;
        assert!(hits_floor(&bird, &config));
        bird.body.pos.y = resting;
        assert!(!hits_floor(&bird, &config));
        bird.body.pos.y = 0.0;
        assert!(!hits_floor(&bird, &config));
        assert!(!hits_bounds(&bird, &config));
    }

    #[test]
    fn test_no_hit_while_pipes_off_screen() {
        let (_, bird, cycle) = setup();
        assert!(!hits_obstacles(&bird, &cycle));
    }

    #[test]
    fn test_hit_top_pipe() {
        let (_, mut bird, mut cycle) = setup();
        cycle.pairs[1].set_x(bird.pos().x);
        bird.body.pos.y = cycle.pairs[1].gap_top() - 5.0;
        assert!(hits_obstacles(&bird, &cycle));
    }

    #[test]
    fn test_hit_bottom_pipe() {
        let (_, mut bird, mut cycle) = setup();
        cycle.pairs[2].set_x(bird.pos().x);
        bird.body.pos.y = cycle.pairs[2].gap_bottom() - 5.0;
        assert!(hits_obstacles(&bird, &cycle));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let (config, mut bird, mut cycle) = setup();
        cycle.pairs[0].set_x(bird.pos().x);
        bird.body.pos.y = cycle.pairs[0].gap_center - config.bird_size.y / 2.0;
        assert!(!hits_obstacles(&bird, &cycle));
    }

    #[test]
    fn test_rotation_widens_box() {
        let (config, mut bird, mut cycle) = setup();
        // Pipe starts 2px to the right of the unrotated sprite
        cycle.pairs[0].set_x(bird.pos().x + config.bird_size.x + 2.0);
        bird.body.pos.y = cycle.pairs[0].gap_top() + 1.0;
        assert!(!hits_obstacles(&bird, &cycle));

        bird.hitbox_size = crate::rotated_extent(config.bird_size, 45.0);
        assert!(bird.hitbox_size.x > config.bird_size.x + 2.0);
        bird.body.pos.y = cycle.pairs[0].gap_top() - 1.0;
        assert!(hits_obstacles(&bird, &cycle));
    }
}
