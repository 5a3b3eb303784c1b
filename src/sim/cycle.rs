//! Fixed ring of pipe pairs emulating an endless pipe field

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pipe::{PipePair, spawn_gap};
use crate::config::GameConfig;

/// Pipe pairs in horizontal order plus the scoring cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeCycle {
    pub pairs: Vec<PipePair>,
    /// Index of the pair currently evaluated for scoring (wraps modulo count)
    pub cursor: usize,
    /// Distance a recycled pair moves right
    cycle_length: f32,
}

impl PipeCycle {
    /// Lay out `pipe_count` pairs off the right edge of the screen
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut cycle = Self {
            pairs: Vec::with_capacity(config.pipe_count),
            cursor: 0,
            cycle_length: config.pipe_cycle_length(),
        };
        cycle.relayout(config, rng);
        cycle
    }

    /// Restore the initial layout with fresh gaps and nominal velocity
    pub fn relayout(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        self.pairs.clear();
        for i in 0..config.pipe_count {
            let gap = spawn_gap(rng, config.gap_midpoint(), config.gap_jitter);
            self.pairs
                .push(PipePair::new(config, PipePair::spawn_x(config, i), gap as f32));
        }
        self.cursor = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Move every pair by its velocity
    pub fn advance(&mut self, dt: f32) {
        for pair in &mut self.pairs {
            pair.advance(dt);
        }
    }

    /// Relocate pairs whose trailing edge crossed the left boundary
    ///
    /// A recycled pair moves exactly one cycle length right of where it is
    /// now and gets a new gap. Returns how many pairs were recycled.
    pub fn recycle(&mut self, config: &GameConfig, rng: &mut impl Rng) -> usize {
        let mut recycled = 0;
        for (i, pair) in self.pairs.iter_mut().enumerate() {
            if pair.top.is_off_left() {
                let x = pair.x() + self.cycle_length;
                pair.set_x(x);
                let gap = spawn_gap(rng, config.gap_midpoint(), config.gap_jitter);
                pair.set_gap(gap as f32);
                log::debug!("Recycled pipe pair {i} to x={x} gap={gap}");
                recycled += 1;
            }
        }
        recycled
    }

    /// Advance then recycle
    pub fn tick(&mut self, config: &GameConfig, rng: &mut impl Rng, dt: f32) -> usize {
        self.advance(dt);
        self.recycle(config, rng)
    }

    /// Pair under the scoring cursor (`None` when there are no pipes)
    pub fn current_pair(&self) -> Option<&PipePair> {
        if self.pairs.is_empty() {
            return None;
        }
        self.pairs.get(self.cursor % self.pairs.len())
    }

    /// Step the cursor to the next pair
    pub fn advance_cursor(&mut self) {
        if !self.pairs.is_empty() {
            self.cursor = (self.cursor + 1) % self.pairs.len();
        }
    }

    /// Move the cursor on if `bird_x` is past the current pair's trailing
    /// edge less `lead`. Returns true when the cursor moved.
    pub fn advance_scoring_cursor(&mut self, bird_x: f32, lead: f32) -> bool {
        let passed = match self.current_pair() {
            Some(pair) => bird_x > pair.x() + pair.width() - lead,
            None => false,
        };
        if passed {
            self.advance_cursor();
        }
        passed
    }

    pub fn freeze(&mut self) {
        for pair in &mut self.pairs {
            pair.freeze();
        }
    }

    pub fn resume(&mut self, config: &GameConfig) {
        for pair in &mut self.pairs {
            pair.resume(config.pipe_velocity);
        }
    }
}
