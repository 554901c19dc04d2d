//! Brick Break - a single-screen paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, phase machine)
//! - `ranking`: Top-10 high score leaderboard
//! - `persistence`: Ranking stores (JSON file, in-memory)
//! - `config`: Game configuration, loadable from JSON

pub mod config;
pub mod persistence;
pub mod ranking;
pub mod sim;

pub use config::{BrickResolution, GameConfig};
pub use persistence::{FileRankingStore, MemoryRankingStore, RankingStore};
pub use ranking::{Ranking, RankingEntry};

/// Game configuration constants
pub mod consts {
    /// Simulation cadence: one tick per rendered frame
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the bottom of the screen to the paddle's top edge
    pub const PADDLE_BOTTOM_GAP: f32 = 50.0;
    /// Width lost on every level-up
    pub const PADDLE_SHRINK_PER_LEVEL: f32 = 10.0;
    pub const PADDLE_MIN_WIDTH: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Per-axis speed after a reset
    pub const BALL_SERVE_SPEED: f32 = 5.0;
    /// Horizontal speed scale for paddle bounces
    pub const PADDLE_BOUNCE_SPEED: f32 = 7.0;
    /// Limits how sharply an edge hit redirects the ball
    pub const BOUNCE_ANGLE_SCALE: f32 = 0.8;

    /// Brick grid layout
    pub const BRICK_COLUMNS: usize = 9;
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    pub const BRICK_PITCH_X: f32 = 85.0;
    pub const BRICK_PITCH_Y: f32 = 35.0;
    pub const BRICK_OFFSET_X: f32 = 20.0;
    pub const BRICK_OFFSET_Y: f32 = 50.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Ranking sizes
    pub const MAX_RANKING_ENTRIES: usize = 10;
    pub const MENU_RANKING_ROWS: usize = 5;

    /// Default ranking file, relative to the working directory
    pub const RANKING_FILE: &str = "ranking.json";
    /// Name recorded for scores when the front end supplies none
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}
