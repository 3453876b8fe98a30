//! Ball/paddle collision
//!
//! Wall and brick collisions live with their owners; the paddle bounce is
//! its own function because the re-angling rule is the heart of the game
//! feel and needs isolated tests.

use super::state::{Ball, Paddle};
use crate::consts::{BALL_SPEED, PADDLE_DEFLECT};

/// Bounce the ball off the paddle. Returns true when a bounce happened.
///
/// The bounce only fires while the ball center is above the paddle's
/// vertical midpoint, so a ball sweeping past the side is not rescued.
/// Hitting off-center re-angles the ball away from the paddle center,
/// but only when the ball was already travelling toward that side; the
/// added speed scales with the offset and is never clamped.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Paddle) -> bool {
    let rect = paddle.collision_rect();
    if !rect.overlaps_circle(ball.pos, ball.radius) || ball.pos.y > paddle.pos.y {
        return false;
    }

    ball.pos.y = paddle.pos.y - paddle.height / 2.0 - ball.radius;
    ball.vel.y = -ball.vel.y;

    if ball.vel.x < 0.0 && ball.pos.x < paddle.pos.x {
        ball.vel.x = -BALL_SPEED + (paddle.pos.x - ball.pos.x) * -PADDLE_DEFLECT;
    } else if ball.vel.x > 0.0 && ball.pos.x > paddle.pos.x {
        ball.vel.x = BALL_SPEED + (ball.pos.x - paddle.pos.x) * PADDLE_DEFLECT;
    }

    true
}
