//! Per-frame snapshot for the renderer
//!
//! Plain data only. The renderer owns all drawing and text layout.

use serde::Serialize;

use super::collision::Aabb;
use super::state::{BrickColor, GamePhase, GameState};
use crate::consts::MENU_RANKING_ROWS;
use crate::ranking::{Ranking, RankingEntry};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Aabb> for RectView {
    fn from(aabb: Aabb) -> Self {
        let size = aabb.size();
        Self {
            x: aabb.min.x,
            y: aabb.min.y,
            width: size.x,
            height: size.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub rect: RectView,
    pub color: BrickColor,
    pub rgb: [u8; 3],
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub phase_name: &'static str,
    pub paddle: RectView,
    pub ball_center: [f32; 2],
    pub ball_radius: f32,
    /// Visible bricks only
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Top of the ranking, filled in the menu only
    pub ranking: Vec<RankingEntry>,
}

impl FrameView {
    pub fn capture(state: &GameState, ranking: &Ranking) -> Self {
        let bricks = state
            .bricks
            .iter()
            .filter(|b| b.visible)
            .map(|b| BrickView {
                rect: b.rect().into(),
                color: b.color,
                rgb: b.color.rgb(),
            })
            .collect();

        let ranking = if state.phase == GamePhase::Menu {
            ranking.top(MENU_RANKING_ROWS).to_vec()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase,
            phase_name: state.phase.as_str(),
            paddle: state.paddle.rect().into(),
            ball_center: state.ball.pos.to_array(),
            ball_radius: state.ball.radius,
            bricks,
            score: state.score,
            lives: state.lives,
            level: state.level,
            ranking,
        }
    }
}
