//! Collision tests for the ball-and-paddle board
//!
//! Axis-aligned geometry only: the ball is treated as its bounding box
//! against the board edges and paddle rectangles.

use super::state::{Ball, Paddle, Side};

/// Reflect off the top or bottom wall. Only flips when moving into the
/// wall, so a ball that is still overlapping after a bounce cannot stick.
pub fn bounce_off_walls(ball: &mut Ball, board_height: f32) -> bool {
    let into_top = ball.top() <= 0.0 && ball.vel.y < 0.0;
    let into_bottom = ball.bottom() >= board_height && ball.vel.y > 0.0;
    if into_top || into_bottom {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// If the ball is striking `paddle` (owned by `side`), return where along
/// the face it landed as a 0..1 fraction from the top.
///
/// A hit needs the ball moving toward the paddle, its box overlapping the
/// paddle horizontally, and its center within the paddle's vertical span.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, side: Side) -> Option<f32> {
    let approaching = ball.vel.x * side.heading() > 0.0;
    if !approaching {
        return None;
    }
    let overlaps_x = ball.left() <= paddle.right() && ball.right() >= paddle.x;
    let within_y = ball.pos.y >= paddle.y && ball.pos.y <= paddle.bottom();
    (overlaps_x && within_y).then(|| paddle.hit_fraction(ball.pos.y))
}

/// Side that scores if the ball center has left the board horizontally
pub fn exit_side(ball: &Ball, board_width: f32) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Opponent)
    } else if ball.pos.x > board_width {
        Some(Side::Player)
    } else {
        None
    }
}
