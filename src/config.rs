//! Game configuration
//!
//! Every tunable the simulation reads lives in one [`GameConfig`] value that is
//! handed to the session at construction. Loaded from a JSON file by the binary;
//! missing fields fall back to [`crate::consts`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How many overlapping bricks a single tick may destroy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrickResolution {
    /// First visible brick in creation order wins; the scan stops there
    #[default]
    FirstMatch,
    /// Deviation from classic play: every overlapping brick is destroyed,
    /// the ball still reflects once (decided by the first one)
    AllOverlapping,
}

impl BrickResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickResolution::FirstMatch => "first_match",
            BrickResolution::AllOverlapping => "all_overlapping",
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels moved per tick while a direction is held
    pub paddle_speed: f32,
    /// Gap between the paddle's top edge and the bottom of the screen
    pub paddle_bottom_gap: f32,
    pub paddle_shrink_per_level: f32,
    pub paddle_min_width: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_serve_speed: f32,
    pub paddle_bounce_speed: f32,
    pub bounce_angle_scale: f32,
    /// Clamp the paddle impact offset to [-1, 1] before scaling.
    /// Off by default: a ball caught outside the paddle span on the same
    /// tick keeps its steeper angle.
    pub clamp_paddle_bounce: bool,

    // === Bricks ===
    pub brick_columns: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_pitch_x: f32,
    pub brick_pitch_y: f32,
    pub brick_offset_x: f32,
    pub brick_offset_y: f32,
    pub brick_resolution: BrickResolution,

    // === Session ===
    pub starting_lives: u8,
    /// Name written to the ranking on game over
    pub player_name: String,
    pub ranking_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_gap: PADDLE_BOTTOM_GAP,
            paddle_shrink_per_level: PADDLE_SHRINK_PER_LEVEL,
            paddle_min_width: PADDLE_MIN_WIDTH,

            ball_radius: BALL_RADIUS,
            ball_serve_speed: BALL_SERVE_SPEED,
            paddle_bounce_speed: PADDLE_BOUNCE_SPEED,
            bounce_angle_scale: BOUNCE_ANGLE_SCALE,
            clamp_paddle_bounce: false,

            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_pitch_x: BRICK_PITCH_X,
            brick_pitch_y: BRICK_PITCH_Y,
            brick_offset_x: BRICK_OFFSET_X,
            brick_offset_y: BRICK_OFFSET_Y,
            brick_resolution: BrickResolution::FirstMatch,

            starting_lives: STARTING_LIVES,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            ranking_path: PathBuf::from(RANKING_FILE),
        }
    }
}

impl GameConfig {
    /// Top edge of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_bottom_gap
    }

    /// Right edge of the brick grid
    pub fn grid_right(&self) -> f32 {
        self.brick_offset_x
            + (self.brick_columns.saturating_sub(1)) as f32 * self.brick_pitch_x
            + self.brick_width
    }

    /// Reject geometry the simulation cannot keep its invariants under
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen must have a positive size, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(
            self.paddle_width > 0.0 && self.paddle_width <= self.screen_width,
            "paddle width {} does not fit a {} wide screen",
            self.paddle_width,
            self.screen_width
        );
        ensure!(
            self.paddle_min_width > 0.0 && self.paddle_min_width <= self.paddle_width,
            "paddle minimum width {} must be in (0, {}]",
            self.paddle_min_width,
            self.paddle_width
        );
        ensure!(
            self.paddle_shrink_per_level >= 0.0,
            "paddle shrink must not be negative"
        );
        ensure!(
            self.paddle_bottom_gap > 0.0 && self.paddle_bottom_gap < self.screen_height,
            "paddle gap {} must lie inside the screen",
            self.paddle_bottom_gap
        );
        ensure!(self.ball_radius > 0.0, "ball radius must be positive");
        ensure!(self.ball_serve_speed > 0.0, "ball serve speed must be positive");
        ensure!(self.brick_columns > 0, "brick grid needs at least one column");
        ensure!(
            self.grid_right() <= self.screen_width,
            "brick grid ends at x={} past the screen width {}",
            self.grid_right(),
            self.screen_width
        );
        ensure!(self.starting_lives > 0, "a session needs at least one life");
        Ok(())
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!(
            "Loaded config from {} (brick resolution: {})",
            path.display(),
            config.brick_resolution.as_str()
        );
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("{:#}; using default config", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }
}
