//! Game tuning supplied from outside the simulation
//!
//! Everything here is an external input: screen and sprite dimensions,
//! velocities, physics constants and pipe layout. The simulation assumes a
//! validated config; `validate` is the boundary that rejects bad ones.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a config is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen size must be positive, got {0:?}")]
    ScreenSize(Vec2),
    #[error("ground height {ground} leaves no playable area on a {screen} px screen")]
    GroundTooTall { ground: f32, screen: f32 },
    #[error("{layer} layer: tile size must be positive, got {size:?}")]
    LayerSize { layer: &'static str, size: Vec2 },
    #[error("pipe size must be positive, got {0:?}")]
    PipeSize(Vec2),
    #[error("pipe spacing must not be negative, got {0}")]
    PipeSpacing(f32),
    #[error("gap height must be positive, got {0}")]
    GapHeight(f32),
    #[error("gap jitter must not be negative, got {0}")]
    GapJitter(i32),
    #[error("gap range [{low}, {high}] falls outside the playable area (0..{playable})")]
    GapOutOfBounds { low: f32, high: f32, playable: f32 },
    #[error("pipe height {pipe} is too short to reach the top of the screen (needs {needed})")]
    PipeTooShort { pipe: f32, needed: f32 },
    #[error("bird size must be positive, got {0:?}")]
    BirdSize(Vec2),
    #[error("animation needs at least one frame and a positive interval")]
    Animation,
    #[error("frame rate must be positive")]
    FrameRate,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One parallax scenery layer: a row of identical tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Tile width and height
    pub size: Vec2,
    /// Number of tiles in the row
    pub count: usize,
    /// Nominal velocity (pixels/s)
    pub velocity: Vec2,
}

impl LayerConfig {
    pub const fn new(size: Vec2, count: usize, velocity: Vec2) -> Self {
        Self {
            size,
            count,
            velocity,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_size: Vec2,
    pub frame_rate: u32,

    // === Scenery (back to front) ===
    pub clouds: LayerConfig,
    pub buildings: LayerConfig,
    pub trees: LayerConfig,
    pub ground: LayerConfig,

    // === Pipes ===
    pub pipe_size: Vec2,
    pub pipe_velocity: Vec2,
    pub pipe_count: usize,
    /// Horizontal distance between one pair's trailing edge and the next pair's leading edge
    pub pipe_spacing: f32,
    /// Vertical opening between the top and bottom pipe
    pub gap_height: f32,
    /// Gap centre is drawn uniformly within ± this many pixels of the playable midpoint
    pub gap_jitter: i32,

    // === Bird ===
    pub bird_size: Vec2,
    pub bird_start: Vec2,
    /// Angle (degrees) at spawn and after every jump; negative is nose up
    pub bird_start_angle: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Upward speed set by a jump (pixels/s)
    pub jump_impulse: f32,
    /// Nose-down rotation rate (degrees/s)
    pub angular_speed: f32,
    /// Largest nose-down angle (degrees)
    pub max_tilt: f32,
    pub animation_frames: usize,
    /// Seconds per animation frame
    pub animation_interval: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(500.0, 750.0),
            frame_rate: 60,

            clouds: LayerConfig::new(Vec2::new(500.0, 120.0), 3, Vec2::new(-30.0, 0.0)),
            buildings: LayerConfig::new(Vec2::new(500.0, 150.0), 3, Vec2::new(-60.0, 0.0)),
            trees: LayerConfig::new(Vec2::new(500.0, 80.0), 3, Vec2::new(-120.0, 0.0)),
            ground: LayerConfig::new(Vec2::new(500.0, 100.0), 3, Vec2::new(-200.0, 0.0)),

            pipe_size: Vec2::new(80.0, 500.0),
            pipe_velocity: Vec2::new(-200.0, 0.0),
            pipe_count: 3,
            pipe_spacing: 200.0,
            gap_height: 180.0,
            gap_jitter: 150,

            bird_size: Vec2::new(51.0, 36.0),
            bird_start: Vec2::new(100.0, 300.0),
            bird_start_angle: -20.0,
            gravity: 1500.0,
            jump_impulse: 450.0,
            angular_speed: 120.0,
            max_tilt: 100.0,
            animation_frames: 3,
            animation_interval: 0.07,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Height of the area above the ground
    #[inline]
    pub fn playable_height(&self) -> f32 {
        self.screen_size.y - self.ground.size.y
    }

    /// Centre of the gap range (integer, like every gap draw)
    #[inline]
    pub fn gap_midpoint(&self) -> i32 {
        (self.playable_height() / 2.0).floor() as i32
    }

    /// Half of the gap opening
    #[inline]
    pub fn half_gap(&self) -> f32 {
        self.gap_height / 2.0
    }

    /// Distance a recycled pipe pair jumps to the right (one full cycle)
    #[inline]
    pub fn pipe_cycle_length(&self) -> f32 {
        self.pipe_count as f32 * (self.pipe_size.x + self.pipe_spacing)
    }

    /// Fixed simulation step derived from the frame rate
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_size.x <= 0.0 || self.screen_size.y <= 0.0 {
            return Err(ConfigError::ScreenSize(self.screen_size));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::FrameRate);
        }

        for (layer, cfg) in [
            ("clouds", &self.clouds),
            ("buildings", &self.buildings),
            ("trees", &self.trees),
            ("ground", &self.ground),
        ] {
            if cfg.size.x <= 0.0 || cfg.size.y <= 0.0 {
                return Err(ConfigError::LayerSize {
                    layer,
                    size: cfg.size,
                });
            }
        }
        if self.playable_height() <= 0.0 {
            return Err(ConfigError::GroundTooTall {
                ground: self.ground.size.y,
                screen: self.screen_size.y,
            });
        }

        if self.bird_size.x <= 0.0 || self.bird_size.y <= 0.0 {
            return Err(ConfigError::BirdSize(self.bird_size));
        }
        if self.animation_frames == 0 || self.animation_interval <= 0.0 {
            return Err(ConfigError::Animation);
        }

        // Pipe layout only matters when there are pipes
        if self.pipe_count == 0 {
            return Ok(());
        }
        if self.pipe_size.x <= 0.0 || self.pipe_size.y <= 0.0 {
            return Err(ConfigError::PipeSize(self.pipe_size));
        }
        if self.pipe_spacing < 0.0 {
            return Err(ConfigError::PipeSpacing(self.pipe_spacing));
        }
        if self.gap_height <= 0.0 {
            return Err(ConfigError::GapHeight(self.gap_height));
        }
        if self.gap_jitter < 0 {
            return Err(ConfigError::GapJitter(self.gap_jitter));
        }

        let mid = self.gap_midpoint() as f32;
        let jitter = self.gap_jitter as f32;
        let low = mid - jitter - self.half_gap();
        let high = mid + jitter + self.half_gap();
        let playable = self.playable_height();
        if low < 0.0 || high > playable {
            return Err(ConfigError::GapOutOfBounds {
                low,
                high,
                playable,
            });
        }

        let needed = mid + jitter - self.half_gap();
        if self.pipe_size.y < needed {
            return Err(ConfigError::PipeTooShort {
                pipe: self.pipe_size.y,
                needed,
            });
        }

        Ok(())
    }
}
