//! Grid engine state

use std::collections::VecDeque;

use glam::IVec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use crate::error::ConfigError;
use crate::input::{Direction, InputSnapshot};
use crate::rng::{self, RandomSource};
use crate::settings::SnakeConfig;
use crate::sim::{Engine, GamePhase};

/// Read-only view handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub phase: GamePhase,
    /// Occupied cells, head first
    pub segments: Vec<IVec2>,
    pub heading: Direction,
    /// `None` only once the grid is completely filled
    pub food: Option<IVec2>,
    pub score: u32,
    pub grid_size: u32,
    /// Completed moves since the last reset
    pub ticks: u64,
}

/// Growing-trail engine. Owns every entity; hosts only get snapshots.
#[derive(Debug, Clone)]
pub struct SnakeEngine<R = Pcg32> {
    pub(crate) config: SnakeConfig,
    pub(crate) rng: R,
    pub(crate) phase: GamePhase,
    /// Head at the front
    pub(crate) segments: VecDeque<IVec2>,
    /// Direction travelled on the last tick
    pub(crate) heading: Direction,
    /// Direction the next tick will take
    pub(crate) pending: Direction,
    pub(crate) food: Option<IVec2>,
    pub(crate) score: u32,
    pub(crate) ticks: u64,
}

impl SnakeEngine<Pcg32> {
    /// Engine with a seeded PCG
    pub fn with_seed(config: SnakeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, rng::seeded(seed))
    }
}

impl<R: RandomSource> SnakeEngine<R> {
    pub fn new(config: SnakeConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            rng,
            phase: GamePhase::NotStarted,
            segments: VecDeque::new(),
            heading: Direction::Right,
            pending: Direction::Right,
            food: None,
            score: 0,
            ticks: 0,
        };
        engine.reset_entities();
        Ok(engine)
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn head(&self) -> IVec2 {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true; the actor always has a head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = IVec2> + '_ {
        self.segments.iter().copied()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<IVec2> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        let g = self.config.grid_size as i32;
        (0..g).contains(&cell.x) && (0..g).contains(&cell.y)
    }

    /// Request a turn for the next tick.
    ///
    /// Ignored unless running or paused. A request for the exact reverse of
    /// the direction last travelled is rejected, even if an earlier request
    /// this tick already turned the pending direction.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return false;
        }
        if direction == self.heading.opposite() {
            log::trace!("Rejected reversal {:?} while heading {:?}", direction, self.heading);
            return false;
        }
        self.pending = direction;
        true
    }

    /// Running <-> Paused. Returns false from any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            _ => return false,
        };
        log::info!("Snake {:?}", self.phase);
        true
    }

    pub(crate) fn reset_entities(&mut self) {
        let g = self.config.grid_size as i32;
        self.segments.clear();
        self.segments.push_back(IVec2::splat(g / 2));
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.ticks = 0;

        let preferred = IVec2::splat(g * 3 / 4);
        self.food = if self.segments.contains(&preferred) {
            place_food(&mut self.rng, self.config.grid_size, &self.segments)
        } else {
            Some(preferred)
        };
    }
}

impl<R: RandomSource> Engine for SnakeEngine<R> {
    type Snapshot = SnakeSnapshot;

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
        log::info!("Snake started on a {0}x{0} grid", self.config.grid_size);
        true
    }

    fn restart(&mut self) {
        self.reset_entities();
        self.phase = GamePhase::NotStarted;
        log::info!("Snake reset");
    }

    /// Start when idle, pause/resume while playing
    fn on_action(&mut self) {
        if self.phase.can_start() {
            self.start();
        } else {
            self.toggle_pause();
        }
    }

    fn tick(&mut self, input: &InputSnapshot) {
        for direction in input.direction_presses() {
            self.steer(direction);
        }
        self.step();
    }

    fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            phase: self.phase,
            segments: self.segments.iter().copied().collect(),
            heading: self.heading,
            food: self.food,
            score: self.score,
            grid_size: self.config.grid_size,
            ticks: self.ticks,
        }
    }
}
