//! Ball-and-paddle entities and engine state

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::rng::{self, RandomSource};
use crate::settings::PongConfig;
use crate::sim::{Engine, GamePhase};

/// Which end of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, keyboard controlled
    Player,
    /// Right paddle, tracks the ball
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Horizontal sign of travel toward this side's paddle
    pub fn heading(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at board center with the opening serve velocity
    pub fn kickoff(config: &PongConfig) -> Self {
        Self {
            pos: Vec2::new(config.board_width / 2.0, config.board_height / 2.0),
            vel: Vec2::new(
                config.serve_speed.min(config.max_ball_speed),
                config.serve_speed,
            ),
            radius: config.ball_radius,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A paddle; `x`/`y` is the top-left corner and only `y` ever changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle for `side`, vertically centered
    pub fn for_side(side: Side, config: &PongConfig) -> Self {
        let x = match side {
            Side::Player => config.paddle_inset,
            Side::Opponent => config.board_width - config.paddle_inset - config.paddle_width,
        };
        Self {
            x,
            y: (config.board_height - config.paddle_height) / 2.0,
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move vertically, staying within `[0, board_height - height]`
    pub fn move_by(&mut self, dy: f32, board_height: f32) {
        self.y = (self.y + dy).clamp(0.0, board_height - self.height);
    }

    /// Step toward `target_y` unless already within `dead_zone` of it
    pub fn track(&mut self, target_y: f32, dead_zone: f32, speed: f32, board_height: f32) {
        let center = self.center_y();
        let dy = if center < target_y - dead_zone {
            speed
        } else if center > target_y + dead_zone {
            -speed
        } else {
            0.0
        };
        self.move_by(dy, board_height);
    }

    /// Where along the face `y` lands: 0.0 at the top edge, 1.0 at the bottom
    pub fn hit_fraction(&self, y: f32) -> f32 {
        ((y - self.y) / self.height).clamp(0.0, 1.0)
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Add one point, returning the side's new total
    pub fn award(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        *slot += 1;
        *slot
    }

    /// Side that has reached `threshold`, if any
    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.player >= threshold {
            Some(Side::Player)
        } else if self.opponent >= threshold {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongSnapshot {
    pub phase: GamePhase,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub score: Score,
    pub winner: Option<Side>,
    pub board: Vec2,
    pub ticks: u64,
}

/// Ball-and-paddle engine. Owns every entity; hosts only get snapshots.
#[derive(Debug, Clone)]
pub struct PongEngine<R = Pcg32> {
    pub(crate) config: PongConfig,
    pub(crate) rng: R,
    pub(crate) phase: GamePhase,
    pub(crate) ball: Ball,
    pub(crate) player: Paddle,
    pub(crate) opponent: Paddle,
    pub(crate) score: Score,
    /// Ticks simulated since the last reset
    pub(crate) ticks: u64,
}

impl PongEngine<Pcg32> {
    /// Engine with a seeded PCG
    pub fn with_seed(config: PongConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, rng::seeded(seed))
    }
}

impl<R: RandomSource> PongEngine<R> {
    pub fn new(config: PongConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ball: Ball::kickoff(&config),
            player: Paddle::for_side(Side::Player, &config),
            opponent: Paddle::for_side(Side::Opponent, &config),
            score: Score::default(),
            phase: GamePhase::NotStarted,
            ticks: 0,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &PongConfig {
        &self.config
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn ball(&self) -> Ball {
        self.ball
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.score.winner(self.config.winning_score)
    }

    pub(crate) fn reset_entities(&mut self) {
        self.ball = Ball::kickoff(&self.config);
        self.player = Paddle::for_side(Side::Player, &self.config);
        self.opponent = Paddle::for_side(Side::Opponent, &self.config);
        self.score = Score::default();
        self.ticks = 0;
    }
}

impl<R: RandomSource> Engine for PongEngine<R> {
    type Snapshot = PongSnapshot;

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn start(&mut self) -> bool {
        if !self.phase.can_start() {
            return false;
        }
        if self.phase == GamePhase::Ended {
            self.reset_entities();
        }
        self.phase = GamePhase::Running;
        log::info!("Pong started (first to {})", self.config.winning_score);
        true
    }

    fn restart(&mut self) {
        self.reset_entities();
        self.phase = GamePhase::NotStarted;
        log::info!("Pong reset");
    }

    fn tick(&mut self, input: &InputSnapshot) {
        self.step(input);
    }

    fn snapshot(&self) -> PongSnapshot {
        PongSnapshot {
            phase: self.phase,
            ball: self.ball,
            player: self.player,
            opponent: self.opponent,
            score: self.score,
            winner: self.winner(),
            board: Vec2::new(self.config.board_width, self.config.board_height),
            ticks: self.ticks,
        }
    }
}
