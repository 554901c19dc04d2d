//! Fixed-step simulation tick
//!
//! One call per rendered frame. Order within a tick:
//! 1. discrete commands (phase machine, at most one transition)
//! 2. held directions move the paddle
//! 3. the ball advances and bounces off the walls
//! 4. paddle, bricks, fall-through, level clear

use glam::Vec2;

use super::collision::{
    ball_fell, ball_hits_paddle, brick_reflection, bricks_to_resolve, paddle_bounce,
    paddle_offset,
};
use super::state::{Brick, BrickColor, Command, Direction, GameEvent, GamePhase, GameState};
use crate::config::GameConfig;
use crate::persistence::RankingStore;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the menu (space)
    pub start: bool,
    /// Back to the menu mid-run (escape)
    pub pause: bool,
    /// New run from the game-over screen
    pub replay: bool,
    /// Menu from the game-over screen
    pub menu: bool,
    /// Held directions
    pub move_left: bool,
    pub move_right: bool,
}

impl TickInput {
    fn commands(&self) -> impl Iterator<Item = Command> {
        [
            (self.start, Command::Start),
            (self.pause, Command::Pause),
            (self.replay, Command::Replay),
            (self.menu, Command::Menu),
        ]
        .into_iter()
        .filter_map(|(pressed, cmd)| pressed.then_some(cmd))
    }
}

/// Build a fresh grid: one row per brick colour, `brick_columns` wide,
/// row-major
pub fn generate_bricks(config: &GameConfig) -> Vec<Brick> {
    let size = Vec2::new(config.brick_width, config.brick_height);
    let mut bricks = Vec::with_capacity(BrickColor::ROWS.len() * config.brick_columns);
    for (row, color) in BrickColor::ROWS.iter().enumerate() {
        for col in 0..config.brick_columns {
            let pos = Vec2::new(
                config.brick_offset_x + col as f32 * config.brick_pitch_x,
                config.brick_offset_y + row as f32 * config.brick_pitch_y,
            );
            bricks.push(Brick::new(pos, size, *color));
        }
    }
    bricks
}

/// Advance the session by one tick.
///
/// `store` is only touched when the last life is lost.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    store: &mut dyn RankingStore,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    apply_commands(state, input, &mut events);
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    let screen_width = state.config.screen_width;
    if input.move_left {
        state.paddle.step(Direction::Left, screen_width);
    }
    if input.move_right {
        state.paddle.step(Direction::Right, screen_width);
    }

    if state.ball.step(screen_width) {
        events.push(GameEvent::WallBounce);
    }

    resolve_collisions(state, store, &mut events);
    events
}

/// First command valid in the current phase wins; the rest are ignored
fn apply_commands(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    let Some(transition) = input.commands().find_map(|cmd| from.on_command(cmd)) else {
        return;
    };

    if transition.reset {
        state.reset();
    }
    state.phase = transition.to;
    log::info!(
        "Phase {} -> {}{}",
        from.as_str(),
        transition.to.as_str(),
        if transition.reset { " (new run)" } else { "" }
    );
    events.push(GameEvent::PhaseChanged {
        from,
        to: transition.to,
    });
}

/// Collision pass, fixed order: paddle, bricks, fall-through, level clear
fn resolve_collisions(
    state: &mut GameState,
    store: &mut dyn RankingStore,
    events: &mut Vec<GameEvent>,
) {
    let config = &state.config;

    // 1. Paddle
    if ball_hits_paddle(&state.ball, &state.paddle) {
        let offset = paddle_offset(state.ball.pos.x, &state.paddle, config.clamp_paddle_bounce);
        state.ball.vel = paddle_bounce(
            state.ball.vel,
            offset,
            config.bounce_angle_scale,
            config.paddle_bounce_speed,
        );
        events.push(GameEvent::PaddleHit);
    }

    // 2. Bricks. The first hit decides the reflection.
    let hits = bricks_to_resolve(&state.ball, &state.bricks, config.brick_resolution);
    if let Some(&first) = hits.first() {
        let reflect = brick_reflection(state.ball.pos, &state.bricks[first].rect());
        state.ball.vel = reflect.apply(state.ball.vel);
    }
    for i in hits {
        let brick = &mut state.bricks[i];
        brick.visible = false;
        state.score += u64::from(brick.points);
        events.push(GameEvent::BrickDestroyed {
            color: brick.color,
            points: brick.points,
        });
    }

    // 3. Fall-through
    if ball_fell(&state.ball, state.config.screen_height) {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives > 0 {
            log::debug!("Life lost, {} left", state.lives);
            state.serve_ball();
        } else {
            end_run(state, store, events);
            return;
        }
    }

    // 4. Level clear
    if state.level_cleared() {
        state.level += 1;
        state.bricks = generate_bricks(&state.config);
        state.serve_ball();
        state
            .paddle
            .shrink(state.config.paddle_shrink_per_level, state.config.paddle_min_width);
        log::info!(
            "Level {} reached (score {}, paddle width {})",
            state.level,
            state.score,
            state.paddle.width
        );
        events.push(GameEvent::LevelComplete { level: state.level });
    }
}

/// Lives exhausted: enter game over and record the score.
/// A failed save is logged; the run still ends.
fn end_run(state: &mut GameState, store: &mut dyn RankingStore, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::PhaseChanged {
        from: GamePhase::Playing,
        to: GamePhase::GameOver,
    });

    let rank = match store.save(&state.config.player_name, state.score) {
        Ok(rank) => rank,
        Err(e) => {
            log::error!("Failed to save score {}: {:#}", state.score, e);
            None
        }
    };
    log::info!(
        "Game over at level {} with score {} (rank {:?})",
        state.level,
        state.score,
        rank
    );
    events.push(GameEvent::GameOver {
        score: state.score,
        rank,
    });
}
