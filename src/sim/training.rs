//! Training mode: many birds, one shared world
//!
//! Each generation every entrant gets its own bird, all flying through the
//! same pipe cycle. Controllers see a fixed observation and decide whether
//! to flap; fitness accrues per surviving tick and is docked on collision.

use super::bird::Bird;
use super::collision::{hits_bounds, hits_obstacles};
use super::pipe::PipePair;
use super::state::World;
use super::tick::TickInput;
use crate::config::GameConfig;
use crate::consts::*;

/// What a controller sees each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation(pub [f32; OBSERVATION_SIZE]);

impl Observation {
    /// Distances from `bird` to the current pair
    ///
    /// Order: horizontal distance to the top pipe, vertical distance to the
    /// bottom pipe's top edge, vertical distance to the top pipe's bottom
    /// edge, vertical velocity, angle. With no pipes the floor and ceiling
    /// stand in for the gap edges.
    pub fn new(bird: &Bird, pair: Option<&PipePair>, config: &GameConfig) -> Self {
        let pos = bird.pos();
        let (pipe_x, gap_bottom, gap_top) = match pair {
            Some(pair) => (pair.top.pos.x, pair.gap_bottom(), pair.gap_top()),
            None => (config.screen_size.x, config.playable_height(), 0.0),
        };
        Self([
            pipe_x - pos.x,
            gap_bottom - pos.y,
            gap_top - pos.y,
            bird.velocity_y(),
            bird.angle,
        ])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Decides from an observation whether to flap
///
/// Only the first output is read; above `JUMP_THRESHOLD` means jump.
pub trait Controller {
    fn activate(&self, inputs: &[f32]) -> Vec<f32>;
}

impl<F> Controller for F
where
    F: Fn(&[f32]) -> Vec<f32>,
{
    fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        self(inputs)
    }
}

/// Supplies controllers per generation and ranks them afterwards
pub trait EvolutionHarness {
    /// Generation about to be evaluated
    fn generation(&self) -> u32;
    /// Controllers for this generation, one per entrant
    fn controllers(&mut self) -> Vec<Box<dyn Controller>>;
    /// Fitness per entrant (same order as `controllers`), then advance
    fn report(&mut self, fitness: &[f32]);
}

/// A live bird and the controller flying it
pub struct Contestant {
    pub bird: Bird,
    /// Index into the generation's fitness vector
    pub entrant: usize,
    controller: Box<dyn Controller>,
}

/// Result of one training tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingStatus {
    Running,
    /// Every bird has been eliminated
    Finished,
    /// Quit signal received
    Aborted,
}

/// Summary of one evaluated generation
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub generation: u32,
    pub fitness: Vec<f32>,
    pub ticks: u64,
    pub pipes_passed: u32,
    pub status: TrainingStatus,
}

impl GenerationReport {
    pub fn best_fitness(&self) -> f32 {
        self.fitness.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}

/// One generation being evaluated
pub struct TrainingRun {
    pub config: GameConfig,
    pub world: World,
    /// Owned by the harness, passed in for display and logging
    pub generation: u32,
    pub roster: Vec<Contestant>,
    /// Accumulated fitness per entrant (eliminated ones keep their total)
    pub fitness: Vec<f32>,
    pub pipes_passed: u32,
    pub time_ticks: u64,
}

impl TrainingRun {
    pub fn new(
        config: GameConfig,
        seed: u64,
        generation: u32,
        controllers: Vec<Box<dyn Controller>>,
    ) -> Self {
        let world = World::new(&config, seed);
        let fitness = vec![0.0; controllers.len()];
        let roster = controllers
            .into_iter()
            .enumerate()
            .map(|(entrant, controller)| Contestant {
                bird: Bird::new(&config),
                entrant,
                controller,
            })
            .collect();
        Self {
            config,
            world,
            generation,
            roster,
            fitness,
            pipes_passed: 0,
            time_ticks: 0,
        }
    }

    /// Birds still flying
    #[inline]
    pub fn alive(&self) -> usize {
        self.roster.len()
    }

    /// Advance every live bird by `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TrainingStatus {
        if input.quit {
            log::info!("Training aborted in generation {}", self.generation);
            return TrainingStatus::Aborted;
        }
        if self.roster.is_empty() {
            return TrainingStatus::Finished;
        }
        self.time_ticks += 1;

        self.world.recycle(&self.config);

        // Everyone observes the pair that was current when the tick began,
        // even if the lead bird moves the cursor past it below
        let pair = self.world.cycle.current_pair().cloned();

        // The lead bird moves the shared cursor for everyone
        let lead_x = self.roster[0].bird.pos().x;
        if self
            .world
            .cycle
            .advance_scoring_cursor(lead_x, TRAINING_CURSOR_LEAD)
        {
            self.pipes_passed += 1;
        }

        let config = &self.config;
        let cycle = &self.world.cycle;

        // Phase one: fly and mark collisions
        for contestant in self.roster.iter_mut() {
            let bird = &mut contestant.bird;
            let observation = Observation::new(bird, pair.as_ref(), config);
            let output = contestant.controller.activate(observation.as_slice());
            if output.first().is_some_and(|&v| v > JUMP_THRESHOLD) {
                bird.jump(config);
            }

            bird.apply_gravity(config.gravity, dt);
            bird.apply_angle(config, dt);
            bird.animate(config, dt);

            self.fitness[contestant.entrant] += SURVIVAL_REWARD;

            if hits_bounds(bird, config) || hits_obstacles(bird, cycle) {
                self.fitness[contestant.entrant] -= COLLISION_PENALTY;
                bird.alive = false;
            }
        }

        // Phase two: drop eliminated birds with their controllers
        let before = self.roster.len();
        self.roster.retain(|c| c.bird.alive);
        if self.roster.len() != before {
            log::debug!(
                "Generation {}: {} eliminated, {} left",
                self.generation,
                before - self.roster.len(),
                self.roster.len()
            );
        }

        self.world.advance(dt);

        if self.roster.is_empty() {
            TrainingStatus::Finished
        } else {
            TrainingStatus::Running
        }
    }

    /// Tick with a fixed step until every bird is gone or `max_ticks` elapse
    pub fn run(mut self, dt: f32, max_ticks: Option<u64>) -> GenerationReport {
        let input = TickInput::default();
        let mut status = TrainingStatus::Running;
        while status == TrainingStatus::Running {
            if max_ticks.is_some_and(|max| self.time_ticks >= max) {
                break;
            }
            status = self.tick(&input, dt);
        }
        self.into_report(status)
    }

    pub fn into_report(self, status: TrainingStatus) -> GenerationReport {
        GenerationReport {
            generation: self.generation,
            fitness: self.fitness,
            ticks: self.time_ticks,
            pipes_passed: self.pipes_passed,
            status,
        }
    }
}

/// Evaluate `generations` generations from `harness`
///
/// Each generation gets its own world seeded from `seed` and the generation
/// number, so a run is reproducible from its seed.
pub fn train(
    harness: &mut impl EvolutionHarness,
    config: &GameConfig,
    seed: u64,
    generations: u32,
    max_ticks: Option<u64>,
) -> Vec<GenerationReport> {
    let dt = config.frame_dt();
    let mut reports = Vec::with_capacity(generations as usize);
    for _ in 0..generations {
        let generation = harness.generation();
        let controllers = harness.controllers();
        let population = controllers.len();
        let run = TrainingRun::new(
            config.clone(),
            seed.wrapping_add(generation as u64),
            generation,
            controllers,
        );
        let report = run.run(dt, max_ticks);
        log::info!(
            "Generation {}: {} birds, best fitness {:.0}, {} pipes, {} ticks",
            generation,
            population,
            report.best_fitness(),
            report.pipes_passed,
            report.ticks
        );
        harness.report(&report.fitness);
        reports.push(report);
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn never() -> Box<dyn Controller> {
        Box::new(|_: &[f32]| vec![0.0f32])
    }

    fn always() -> Box<dyn Controller> {
        Box::new(|_: &[f32]| vec![1.0f32])
    }

    #[test]
    fn test_observation_layout() {
        let config = GameConfig::default();
        let world = World::new(&config, 4);
        let mut bird = Bird::new(&config);
        bird.body.vel.y = 120.0;
        let pair = world.cycle.current_pair().unwrap();

        let obs = Observation::new(&bird, Some(pair), &config);
        assert_eq!(obs.0[0], pair.top.pos.x - bird.pos().x);
        assert_eq!(obs.0[1], pair.bottom.pos.y - bird.pos().y);
        assert_eq!(obs.0[2], pair.top.pos.y + config.pipe_size.y - bird.pos().y);
        assert_eq!(obs.0[3], 120.0);
        assert_eq!(obs.0[4], config.bird_start_angle);
    }

    #[test]
    fn test_observation_without_pipes() {
        let config = GameConfig::default();
        let mut bird = Bird::new(&config);
        bird.body.vel.y = -40.0;

        let obs = Observation::new(&bird, None, &config);
        assert_eq!(obs.0[0], config.screen_size.x - bird.pos().x);
        assert_eq!(obs.0[1], config.playable_height() - bird.pos().y);
        assert_eq!(obs.0[2], -bird.pos().y);
        assert_eq!(obs.0[3], -40.0);
        assert_eq!(obs.0[4], config.bird_start_angle);
    }

    #[test]
    fn test_observation_uses_pair_before_cursor_moves() {
        let config = GameConfig::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let recorder: Box<dyn Controller> = Box::new(move |inputs: &[f32]| {
            log.borrow_mut().push(inputs.to_vec());
            vec![0.0f32]
        });
        let mut run = TrainingRun::new(config.clone(), 1, 0, vec![recorder]);

        // Lead bird sits just past the cursor threshold of pair 0
        let bird_x = run.roster[0].bird.pos().x;
        let pair_x = bird_x - config.pipe_size.x + TRAINING_CURSOR_LEAD - 1.0;
        run.world.cycle.pairs[0].set_x(pair_x);
        run.roster[0].bird.body.pos.y = run.world.cycle.pairs[0].gap_center;

        run.tick(&TickInput::default(), 0.0);
        assert_eq!(run.pipes_passed, 1);
        assert_eq!(run.world.cycle.cursor, 1);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0][0], pair_x - bird_x);
    }

    #[test]
    fn test_run_without_pipes() {
        let config = GameConfig {
            pipe_count: 0,
            ..Default::default()
        };
        let run = TrainingRun::new(config.clone(), 1, 0, vec![never(), always()]);
        let report = run.run(config.frame_dt(), Some(600));
        assert_eq!(report.pipes_passed, 0);
        assert_eq!(report.status, TrainingStatus::Finished);
        assert!(report.ticks > 0 && report.ticks < 600);
        assert!(report.fitness.iter().all(|&f| f > 0.0));
    }

    #[test]
    fn test_survivors_gain_reward() {
        let config = GameConfig::default();
        let mut run = TrainingRun::new(config, 1, 0, vec![never(), never(), never()]);
        assert_eq!(run.tick(&TickInput::default(), 1.0 / 60.0), TrainingStatus::Running);
        assert_eq!(run.alive(), 3);
        assert!(run.fitness.iter().all(|&f| f == SURVIVAL_REWARD));
    }

    #[test]
    fn test_collision_penalised_and_removed_same_tick() {
        let config = GameConfig::default();
        let mut run = TrainingRun::new(config, 1, 0, vec![never(), never(), never()]);
        // Put entrant 1 inside the first pair's top pipe
        let pair = &run.world.cycle.pairs[0];
        let inside = Vec2::new(pair.x(), pair.gap_top() - 30.0);
        run.roster[1].bird.body.pos = inside;

        run.tick(&TickInput::default(), 0.0);
        assert_eq!(run.alive(), 2);
        assert!(run.roster.iter().all(|c| c.entrant != 1));
        assert_eq!(run.fitness[1], SURVIVAL_REWARD - COLLISION_PENALTY);
        assert_eq!(run.fitness[0], SURVIVAL_REWARD);
        assert_eq!(run.fitness[2], SURVIVAL_REWARD);
    }

    #[test]
    fn test_adjacent_eliminations_not_skipped() {
        let config = GameConfig::default();
        let mut run = TrainingRun::new(config, 1, 0, vec![never(), never(), never(), never()]);
        for c in run.roster.iter_mut().take(3) {
            c.bird.body.pos.y = -10.0;
        }
        run.tick(&TickInput::default(), 0.0);
        assert_eq!(run.alive(), 1);
        assert_eq!(run.roster[0].entrant, 3);
    }

    #[test]
    fn test_controller_output_drives_jump() {
        let config = GameConfig::default();
        let mut run = TrainingRun::new(config, 1, 0, vec![never(), always()]);
        run.tick(&TickInput::default(), 1.0 / 60.0);
        assert!(run.roster[0].bird.velocity_y() > 0.0);
        assert!(run.roster[1].bird.velocity_y() < 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = GameConfig::default();
        let half: Box<dyn Controller> = Box::new(|_: &[f32]| vec![JUMP_THRESHOLD]);
        let mut run = TrainingRun::new(config, 1, 0, vec![half]);
        run.tick(&TickInput::default(), 1.0 / 60.0);
        assert!(run.roster[0].bird.velocity_y() > 0.0);
    }

    #[test]
    fn test_run_finishes_when_all_fall() {
        let config = GameConfig::default();
        let run = TrainingRun::new(config.clone(), 1, 7, vec![never(), never()]);
        let report = run.run(config.frame_dt(), Some(10_000));
        assert_eq!(report.status, TrainingStatus::Finished);
        assert_eq!(report.generation, 7);
        assert!(report.ticks > 0 && report.ticks < 10_000);
        assert_eq!(report.fitness[0], report.fitness[1]);
    }

    #[test]
    fn test_quit_aborts() {
        let mut run = TrainingRun::new(GameConfig::default(), 1, 0, vec![never()]);
        assert_eq!(run.tick(&TickInput::quit(), 0.1), TrainingStatus::Aborted);
        assert_eq!(run.fitness[0], 0.0);
    }

    #[test]
    fn test_empty_roster_is_finished() {
        let mut run = TrainingRun::new(GameConfig::default(), 1, 0, Vec::new());
        assert_eq!(run.tick(&TickInput::default(), 0.1), TrainingStatus::Finished);
    }

    struct Fixed {
        generation: u32,
        reported: Vec<Vec<f32>>,
    }

    impl EvolutionHarness for Fixed {
        fn generation(&self) -> u32 {
            self.generation
        }

        fn controllers(&mut self) -> Vec<Box<dyn Controller>> {
            vec![never(), never()]
        }

        fn report(&mut self, fitness: &[f32]) {
            self.reported.push(fitness.to_vec());
            self.generation += 1;
        }
    }

    #[test]
    fn test_train_reports_each_generation() {
        let mut harness = Fixed {
            generation: 0,
            reported: Vec::new(),
        };
        let reports = train(&mut harness, &GameConfig::default(), 9, 3, Some(5_000));
        assert_eq!(reports.len(), 3);
        assert_eq!(harness.reported.len(), 3);
        assert_eq!(
            reports.iter().map(|r| r.generation).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    proptest! {
        #[test]
        fn prop_fitness_accounting(crashers in prop::collection::vec(any::<bool>(), 1..12)) {
            let config = GameConfig::default();
            let controllers = crashers.iter().map(|_| never()).collect();
            let mut run = TrainingRun::new(config, 1, 0, controllers);
            for (c, &crash) in run.roster.iter_mut().zip(&crashers) {
                if crash {
                    c.bird.body.pos.y = -5.0;
                }
            }

            run.tick(&TickInput::default(), 0.0);

            let survivors = crashers.iter().filter(|&&c| !c).count();
            prop_assert_eq!(run.alive(), survivors);
            for (i, &crash) in crashers.iter().enumerate() {
                let expected = if crash {
                    SURVIVAL_REWARD - COLLISION_PENALTY
                } else {
                    SURVIVAL_REWARD
                };
                prop_assert_eq!(run.fitness[i], expected);
            }
        }
    }
}
