//! Construction-time errors
//!
//! Gameplay never fails: collisions and wall exits are phase transitions.
//! The only thing that can go wrong is a bad configuration, and that is
//! caught before an engine exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive and finite, got {width}x{height}")]
    InvalidBoard { width: f32, height: f32 },

    #[error("paddles of {paddle_width}x{paddle_height} with inset {inset} do not fit a {width}x{height} board")]
    PaddlesDoNotFit {
        paddle_width: f32,
        paddle_height: f32,
        inset: f32,
        width: f32,
        height: f32,
    },

    #[error("ball radius {radius} does not fit a board of height {height}")]
    BallDoesNotFit { radius: f32, height: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("paddle speed-up multiplier must be at least 1.0, got {0}")]
    SpeedupBelowOne(f32),

    #[error("max ball speed {max_speed} exceeds paddle width plus ball diameter ({limit}); the ball would tunnel")]
    BallOutrunsPaddle { max_speed: f32, limit: f32 },

    #[error("serve speed {serve_speed} exceeds max ball speed {max_speed}")]
    ServeTooFast { serve_speed: f32, max_speed: f32 },

    #[error("winning score must be at least 1")]
    ZeroWinningScore,

    #[error("grid size must be between {min} and {max}, got {got}")]
    InvalidGrid { got: u32, min: u32, max: u32 },

    #[error("{0} must be non-zero")]
    ZeroRate(&'static str),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
