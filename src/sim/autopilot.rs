//! Attract-mode player
//!
//! Produces the input a player would send, so a session can run with no
//! keyboard attached (demo screen, headless runs, soak tests).

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Input for the next tick.
///
/// Starts from the menu, then tracks the ball with a slowly drifting offset
/// so bounces come off different parts of the paddle. Never presses replay:
/// leaving the game-over screen is up to the caller.
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Menu => TickInput {
            start: true,
            ..Default::default()
        },
        GamePhase::GameOver => TickInput::default(),
        GamePhase::Playing => {
            let paddle = &state.paddle;
            let t = state.time_ticks as f32 * 0.013;
            let offset = (t.sin() * 0.6 + (t * 0.37).sin() * 0.2) * paddle.width / 2.0;
            let target = state.ball.pos.x + offset;
            let delta = target - paddle.center_x();

            // Dead zone of one step, otherwise the paddle jitters around the target
            TickInput {
                move_left: delta < -paddle.speed,
                move_right: delta > paddle.speed,
                ..Default::default()
            }
        }
    }
}
