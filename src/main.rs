//! Flappy entry point
//!
//! Runs the simulation headless: `play` flies the autopilot through the
//! single-player game, `train` evolves a population of network controllers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use flappy::GameConfig;
use flappy::neuro::{EvolutionParams, Population};
use flappy::renderer::{DrawList, draw_game};
use flappy::sim::{self, GameState, TickInput, TickStatus, autopilot, tick};

/// Side-scrolling arcade game with a neuro-evolution training mode
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the default tuning
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for pipe gap placement
    #[arg(short, long, global = true, default_value_t = 0)]
    seed: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Let the autopilot play for a while
    Play {
        /// Simulated seconds to run
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
    },
    /// Evolve controllers against the pipe course
    Train {
        #[arg(long, default_value_t = 10)]
        generations: u32,

        #[arg(long, default_value_t = 50)]
        population: usize,

        /// Cap on simulated seconds per generation
        #[arg(long)]
        max_seconds: Option<f32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    flappy::logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.validate().context("invalid configuration")?;

    log::info!("Flappy starting with seed {}", args.seed);

    match args.mode {
        Mode::Play { seconds } => play(config, args.seed, seconds),
        Mode::Train {
            generations,
            population,
            max_seconds,
        } => train(config, args.seed, generations, population, max_seconds),
    }
}

fn play(config: GameConfig, seed: u64, seconds: f32) -> Result<()> {
    let dt = config.frame_dt();
    let frames = (seconds.max(0.0) * config.frame_rate as f32).round() as u64;
    let mut state = GameState::new(config, seed);
    let mut frame = DrawList::new();
    let mut deaths = 0u32;
    let mut best = 0u32;

    for _ in 0..frames {
        let input = if !state.is_dead()
            && autopilot::should_jump(&state.bird, &state.world.cycle, &state.config)
        {
            TickInput::jump()
        } else {
            TickInput::default()
        };

        let was_dead = state.is_dead();
        let score = state.score;
        if tick(&mut state, &input, dt) == TickStatus::Quit {
            break;
        }
        if state.is_dead() && !was_dead {
            deaths += 1;
            best = best.max(score);
        }

        frame.clear();
        draw_game(&state, &mut frame);
        log::trace!(
            "Frame {}: {} sprites, {} bytes",
            state.time_ticks,
            frame.instances.len(),
            frame.as_bytes().len()
        );
    }

    best = best.max(state.score);
    log::info!(
        "Played {} ticks: {} deaths, best score {}, final score {}",
        state.time_ticks,
        deaths,
        best,
        state.score
    );
    Ok(())
}

fn train(
    config: GameConfig,
    seed: u64,
    generations: u32,
    population: usize,
    max_seconds: Option<f32>,
) -> Result<()> {
    anyhow::ensure!(population > 0, "population must be at least 1");

    let params = EvolutionParams {
        population,
        ..Default::default()
    };
    let mut harness = Population::new(params, seed);
    let max_ticks = max_seconds.map(|s| (s.max(0.0) * config.frame_rate as f32).round() as u64);

    let reports = sim::train(&mut harness, &config, seed, generations, max_ticks);

    if let Some((fitness, _)) = harness.best() {
        log::info!(
            "Trained {} generations, best fitness {:.0}",
            reports.len(),
            fitness
        );
    }
    Ok(())
}
