//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (brick creation order)
//! - No rendering or platform dependencies; persistence only through
//!   the `RankingStore` handed to `tick`

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod view;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, Reflect};
pub use state::{
    Ball, Brick, BrickColor, Command, Direction, GameEvent, GamePhase, GameState, Paddle,
    Transition,
};
pub use tick::{TickInput, generate_bricks, tick};
pub use view::{BrickView, FrameView, RectView};
