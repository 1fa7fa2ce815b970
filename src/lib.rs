//! Arcade Sim - real-time simulation engines for two casual arcade games
//!
//! Core modules:
//! - `sim`: The two engines (ball-and-paddle physics, growing-trail grid)
//! - `input`: Key state tracking, decoupled from event delivery
//! - `clock`: Tick sources (fixed timestep accumulator, interval timer)
//! - `driver`: Glue that runs an engine from a clock and an input tracker
//! - `settings`: Tuning constants supplied at engine construction
//!
//! Rendering and menu navigation are not part of this crate. A host reads
//! engine snapshots and paints them however it likes.

pub mod autopilot;
pub mod clock;
pub mod driver;
pub mod error;
pub mod input;
pub mod rng;
pub mod settings;
pub mod sim;

pub use clock::{FixedTimestep, IntervalTimer, TickSource};
pub use driver::{Driver, SharedEngine};
pub use error::ConfigError;
pub use input::{Direction, InputSnapshot, InputTracker, Key};
pub use rng::{RandomSource, ScriptedRandom};
pub use settings::{PongConfig, Settings, SnakeConfig};
pub use sim::{Engine, GamePhase};

/// Default tuning constants
pub mod consts {
    /// Ball-paddle simulation rate. Every per-tick speed below assumes it.
    pub const PONG_TICK_HZ: u32 = 60;
    /// Maximum substeps per advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Paddle defaults (pixels, pixels per tick)
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_INSET: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SERVE_SPEED: f32 = 4.0;
    /// Horizontal speed cap; must stay below paddle width + ball diameter
    pub const BALL_MAX_SPEED: f32 = 16.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Full vertical velocity range across the paddle face
    pub const DEFLECTION_RANGE: f32 = 8.0;

    /// Opponent tracking: no movement while within this distance of the ball
    pub const OPPONENT_DEAD_ZONE: f32 = 35.0;
    /// Opponent step as a fraction of paddle speed
    pub const OPPONENT_SPEED_FACTOR: f32 = 1.0;

    pub const WINNING_SCORE: u32 = 5;

    /// Grid game defaults
    pub const GRID_SIZE: u32 = 20;
    pub const MIN_GRID_SIZE: u32 = 2;
    pub const MAX_GRID_SIZE: u32 = 1024;
    pub const SNAKE_TICK_MS: u64 = 150;
    pub const FOOD_REWARD: u32 = 10;
}
