//! Ball-and-paddle engine
//!
//! Continuous positions on a `board_width` x `board_height` board, advanced
//! once per fixed tick. The player paddle sits on the left, the opponent
//! (a deliberately imperfect tracker) on the right.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{bounce_off_walls, exit_side, paddle_contact};
pub use state::{Ball, Paddle, PongEngine, PongSnapshot, Score, Side};
