//! Single-player frame update
//!
//! Order within a tick matters: the death check runs before anything moves
//! so the bird cannot tunnel through a boundary, and the floor check gates
//! gravity.

use super::collision::hits_floor;
use super::state::{GamePhase, GameState};

/// Keys the input source can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Space,
    Other,
}

impl Key {
    /// Up and Space both flap
    #[inline]
    pub fn is_jump(self) -> bool {
        matches!(self, Key::Up | Key::Space)
    }
}

/// Events gathered for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick
    pub pressed: Vec<Key>,
    /// Quit/interrupt signal
    pub quit: bool,
}

impl TickInput {
    /// One jump key press
    pub fn jump() -> Self {
        Self {
            pressed: vec![Key::Space],
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            pressed: Vec::new(),
            quit: true,
        }
    }

    pub fn wants_jump(&self) -> bool {
        self.pressed.iter().any(|k| k.is_jump())
    }
}

/// Whether the caller should keep ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Quit,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickStatus {
    state.time_ticks += 1;

    // Death check / dead timer
    let mut frozen = false;
    match state.phase {
        GamePhase::Alive => {
            if state.bird_collided() {
                state.kill();
                frozen = true;
            }
        }
        GamePhase::Dead => {
            state.advance_death_timer(dt);
            // The reset tick ends here so the bird stays exactly at spawn
            frozen = true;
        }
    }

    if input.quit {
        log::info!("Quit requested at tick {}", state.time_ticks);
        return TickStatus::Quit;
    }
    if frozen {
        return TickStatus::Running;
    }

    if input.wants_jump() {
        state.bird.jump(&state.config);
    }

    state.world.tick(&state.config, dt);

    if !hits_floor(&state.bird, &state.config) {
        state.bird.apply_gravity(state.config.gravity, dt);
        state.bird.apply_angle(&state.config, dt);
    }
    state.bird.animate(&state.config, dt);

    state.update_score();

    TickStatus::Running
}
