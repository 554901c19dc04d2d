//! Game state and core simulation types
//!
//! A session owns exactly one paddle, one ball and one brick grid. They are
//! replaced wholesale on reset and level-up, never patched piecemeal.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::tick::generate_bricks;
use crate::config::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with the ranking (initial)
    Menu,
    /// Active gameplay
    Playing,
    /// Lives exhausted, score recorded
    GameOver,
}

/// Discrete player commands (one-shot key presses)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Replay,
    Menu,
}

/// Outcome of a valid command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: GamePhase,
    /// Replace paddle, ball, bricks and counters before entering `to`
    pub reset: bool,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }

    /// Phase machine. `None` means the command does nothing in this phase.
    ///
    /// Playing -> GameOver is not listed: only the simulation can end a run.
    pub fn on_command(self, command: Command) -> Option<Transition> {
        use Command as C;
        use GamePhase as P;

        let (to, reset) = match (self, command) {
            (P::Menu, C::Start) => (P::Playing, false),
            // Pausing keeps the run intact
            (P::Playing, C::Pause) => (P::Menu, false),
            (P::GameOver, C::Replay) => (P::Playing, true),
            (P::GameOver, C::Menu) => (P::Menu, true),
            _ => return None,
        };
        Some(Transition { to, reset })
    }
}

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Paddle {
    /// Centered paddle at the configured height
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                (config.screen_width - config.paddle_width) / 2.0,
                config.paddle_y(),
            ),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_rect(self.pos, Vec2::new(self.width, self.height))
    }

    /// Shift by `speed`, keeping `0 <= x <= screen_width - width`
    pub fn step(&mut self, direction: Direction, screen_width: f32) {
        let max_x = (screen_width - self.width).max(0.0);
        self.pos.x = (self.pos.x + direction.sign() * self.speed).clamp(0.0, max_x);
    }

    /// Narrow the paddle, never below `min_width`. Never widens.
    pub fn shrink(&mut self, amount: f32, min_width: f32) {
        self.width = (self.width - amount).max(min_width).min(self.width);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Fresh ball at screen center, heading up with a random horizontal sign
    pub fn served<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let speed = config.ball_serve_speed;
        let dx = if rng.random_bool(0.5) { speed } else { -speed };
        Self {
            pos: Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0),
            vel: Vec2::new(dx, -speed),
            radius: config.ball_radius,
        }
    }

    /// Bounding box of the ball
    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Advance one tick and bounce off the side and top walls.
    /// The bottom is open. Returns true if a wall was hit.
    pub fn step(&mut self, screen_width: f32) -> bool {
        self.pos += self.vel;

        let mut bounced = false;
        // Only reflect while heading into the wall, so a slow ball cannot
        // flip back and forth inside the margin
        let at_left = self.pos.x <= self.radius && self.vel.x < 0.0;
        let at_right = self.pos.x >= screen_width - self.radius && self.vel.x > 0.0;
        if at_left || at_right {
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if self.pos.y <= self.radius && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            bounced = true;
        }
        bounced
    }
}

/// Brick colour, one per grid row (top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BrickColor {
    /// Row order, top row first
    pub const ROWS: [BrickColor; 6] = [
        BrickColor::Red,
        BrickColor::Orange,
        BrickColor::Yellow,
        BrickColor::Green,
        BrickColor::Blue,
        BrickColor::Purple,
    ];

    /// Score for breaking a brick of this colour
    pub fn points(self) -> u32 {
        match self {
            BrickColor::Red => 10,
            BrickColor::Orange => 8,
            BrickColor::Yellow => 6,
            BrickColor::Green => 4,
            BrickColor::Blue => 2,
            BrickColor::Purple => 1,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            BrickColor::Red => [255, 0, 0],
            BrickColor::Orange => [255, 165, 0],
            BrickColor::Yellow => [255, 255, 0],
            BrickColor::Green => [0, 255, 0],
            BrickColor::Blue => [0, 0, 255],
            BrickColor::Purple => [128, 0, 128],
        }
    }
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: BrickColor,
    pub points: u32,
    /// Cleared once hit; stays cleared until the grid is regenerated
    pub visible: bool,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, color: BrickColor) -> Self {
        Self {
            pos,
            size,
            color,
            points: color.points(),
            visible: true,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.size)
    }
}

/// Gameplay events produced by a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    WallBounce,
    PaddleHit,
    BrickDestroyed { color: BrickColor, points: u32 },
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    /// `rank` is None if the score missed the board or could not be saved
    GameOver { score: u64, rank: Option<usize> },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// 1-based
    pub level: u32,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Row-major, creation order
    pub bricks: Vec<Brick>,
}

impl GameState {
    /// Create a new session in the menu phase
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::served(&config, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            score: 0,
            lives: config.starting_lives,
            level: 1,
            time_ticks: 0,
            paddle: Paddle::new(&config),
            ball,
            bricks: generate_bricks(&config),
            config,
        }
    }

    /// Full session reset. The phase is left to the caller.
    pub fn reset(&mut self) {
        self.paddle = Paddle::new(&self.config);
        self.ball = Ball::served(&self.config, &mut self.rng);
        self.bricks = generate_bricks(&self.config);
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = 1;
        self.time_ticks = 0;
    }

    /// Replace the ball with a freshly served one
    pub fn serve_ball(&mut self) {
        self.ball = Ball::served(&self.config, &mut self.rng);
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    pub fn level_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.visible)
    }
}
