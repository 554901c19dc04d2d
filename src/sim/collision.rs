//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is treated as its bounding box for
//! bricks, and reflections only ever negate one velocity component.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Brick, Paddle};
use crate::config::BrickResolution;

/// Axis-aligned bounding box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from top-left corner and size
    pub fn from_rect(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Box enclosing a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            max: center + Vec2::splat(radius),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap test, touching edges count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }
}

/// Which velocity component a brick hit negates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflect {
    /// Side hit: negate dx
    Horizontal,
    /// Top/bottom hit: negate dy
    Vertical,
}

impl Reflect {
    pub fn apply(self, vel: Vec2) -> Vec2 {
        match self {
            Reflect::Horizontal => Vec2::new(-vel.x, vel.y),
            Reflect::Vertical => Vec2::new(vel.x, -vel.y),
        }
    }
}

/// Ball is coming down onto the paddle.
///
/// Only the top edge is tested, and only while `dy > 0`, so a ball that
/// overlaps the paddle for several ticks bounces once.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0
        && ball.pos.y + ball.radius >= paddle.pos.y
        && ball.pos.x >= paddle.pos.x
        && ball.pos.x <= paddle.right()
}

/// Impact offset from the paddle center: 0 at the center, ±1 at the edges,
/// positive on the left half
pub fn paddle_offset(ball_x: f32, paddle: &Paddle, clamp: bool) -> f32 {
    let offset = (paddle.center_x() - ball_x) / (paddle.width / 2.0);
    if clamp { offset.clamp(-1.0, 1.0) } else { offset }
}

/// Velocity after a paddle bounce.
///
/// Horizontal speed is rebuilt from the impact offset, so edge hits leave at
/// steep angles and center hits go almost straight up. Vertical speed flips.
pub fn paddle_bounce(vel: Vec2, offset: f32, angle_scale: f32, bounce_speed: f32) -> Vec2 {
    Vec2::new(-offset * angle_scale * bounce_speed, -vel.y)
}

/// Side hit if the ball center lies outside the brick's horizontal span
pub fn brick_reflection(ball_pos: Vec2, brick: &Aabb) -> Reflect {
    if brick.spans_x(ball_pos.x) {
        Reflect::Vertical
    } else {
        Reflect::Horizontal
    }
}

/// Indices of visible bricks the ball overlaps, in creation order
pub fn overlapping_bricks<'a>(
    ball: &'a Ball,
    bricks: &'a [Brick],
) -> impl Iterator<Item = usize> + 'a {
    let bounds = ball.bounds();
    bricks
        .iter()
        .enumerate()
        .filter(move |(_, b)| b.visible && b.rect().overlaps(&bounds))
        .map(|(i, _)| i)
}

/// Bricks to destroy this tick under the given policy
pub fn bricks_to_resolve(ball: &Ball, bricks: &[Brick], policy: BrickResolution) -> Vec<usize> {
    let hits = overlapping_bricks(ball, bricks);
    match policy {
        BrickResolution::FirstMatch => hits.take(1).collect(),
        BrickResolution::AllOverlapping => hits.collect(),
    }
}

/// Ball has dropped past the bottom of the screen
pub fn ball_fell(ball: &Ball, screen_height: f32) -> bool {
    ball.pos.y > screen_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::BrickColor;

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: 10.0,
        }
    }

    fn brick_at(x: f32, y: f32) -> Brick {
        Brick::new(Vec2::new(x, y), Vec2::new(80.0, 30.0), BrickColor::Red)
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_rect(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::from_rect(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let apart = Aabb::from_rect(Vec2::new(10.5, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert_eq!(Aabb::around_circle(Vec2::splat(5.0), 2.0).size(), Vec2::splat(4.0));
    }

    #[test]
    fn test_paddle_hit_requires_downward_motion() {
        let paddle = Paddle::new(&GameConfig::default());
        let falling = ball_at(400.0, 545.0, 0.0, 5.0);
        let rising = ball_at(400.0, 545.0, 0.0, -5.0);
        let above = ball_at(400.0, 530.0, 0.0, 5.0);
        let beside = ball_at(300.0, 545.0, 0.0, 5.0);

        assert!(ball_hits_paddle(&falling, &paddle));
        assert!(!ball_hits_paddle(&rising, &paddle));
        assert!(!ball_hits_paddle(&above, &paddle));
        assert!(!ball_hits_paddle(&beside, &paddle));
    }

    #[test]
    fn test_paddle_bounce_angles() {
        let paddle = Paddle::new(&GameConfig::default());
        let vel = Vec2::new(5.0, 5.0);

        // Center hit goes straight up
        let center = paddle_bounce(vel, paddle_offset(400.0, &paddle, false), 0.8, 7.0);
        assert_eq!(center, Vec2::new(0.0, -5.0));

        // Right edge sends the ball right at full scale
        let right = paddle_bounce(vel, paddle_offset(450.0, &paddle, false), 0.8, 7.0);
        assert!((right.x - 5.6).abs() < 1e-5);
        assert_eq!(right.y, -5.0);

        // Left quarter sends it left, less steeply
        let left = paddle_bounce(vel, paddle_offset(375.0, &paddle, false), 0.8, 7.0);
        assert!((left.x + 2.8).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_offset_clamp() {
        let paddle = Paddle::new(&GameConfig::default());
        assert!((paddle_offset(470.0, &paddle, false) + 1.4).abs() < 1e-5);
        assert_eq!(paddle_offset(470.0, &paddle, true), -1.0);
        assert_eq!(paddle_offset(330.0, &paddle, true), 1.0);
    }

    #[test]
    fn test_brick_reflection_axis() {
        let brick = brick_at(100.0, 100.0).rect();
        // From below, inside the span
        assert_eq!(brick_reflection(Vec2::new(140.0, 138.0), &brick), Reflect::Vertical);
        // From the left side
        assert_eq!(brick_reflection(Vec2::new(92.0, 115.0), &brick), Reflect::Horizontal);
        assert_eq!(
            Reflect::Horizontal.apply(Vec2::new(3.0, -4.0)),
            Vec2::new(-3.0, -4.0)
        );
    }

    #[test]
    fn test_first_match_takes_one_brick() {
        // Ball sits on the seam between two bricks
        let bricks = vec![brick_at(20.0, 50.0), brick_at(105.0, 50.0)];
        let ball = ball_at(102.0, 70.0, 0.0, -5.0);

        assert_eq!(overlapping_bricks(&ball, &bricks).count(), 2);
        assert_eq!(
            bricks_to_resolve(&ball, &bricks, BrickResolution::FirstMatch),
            vec![0]
        );
        assert_eq!(
            bricks_to_resolve(&ball, &bricks, BrickResolution::AllOverlapping),
            vec![0, 1]
        );
    }

    #[test]
    fn test_hidden_bricks_are_skipped() {
        let mut bricks = vec![brick_at(20.0, 50.0), brick_at(105.0, 50.0)];
        bricks[0].visible = false;
        let ball = ball_at(102.0, 70.0, 0.0, -5.0);
        assert_eq!(
            bricks_to_resolve(&ball, &bricks, BrickResolution::FirstMatch),
            vec![1]
        );
    }

    #[test]
    fn test_ball_fell() {
        assert!(!ball_fell(&ball_at(400.0, 600.0, 0.0, 5.0), 600.0));
        assert!(ball_fell(&ball_at(400.0, 601.0, 0.0, 5.0), 600.0));
    }
}
