//! Deterministic simulation module
//!
//! All gameplay logic lives here. Both engines follow the same rules:
//! - One tick is one atomic step; nothing suspends mid-tick
//! - Randomness comes from an injected `RandomSource`
//! - Input arrives as an `InputSnapshot` taken before the tick
//! - Rendering only ever sees an owned snapshot

pub mod pong;
pub mod snake;

use serde::{Deserialize, Serialize};

use crate::input::InputSnapshot;

pub use pong::{PongEngine, PongSnapshot};
pub use snake::{SnakeEngine, SnakeSnapshot};

/// Current phase of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities placed, waiting for a start signal
    #[default]
    NotStarted,
    /// Ticks advance the simulation
    Running,
    /// Ticks are ignored (grid engine only)
    Paused,
    /// Terminal until restart or start
    Ended,
}

impl GamePhase {
    /// Whether a start signal is accepted in this phase
    pub fn can_start(self) -> bool {
        matches!(self, GamePhase::NotStarted | GamePhase::Ended)
    }
}

/// Common control surface of both engines
pub trait Engine {
    type Snapshot;

    fn phase(&self) -> GamePhase;

    /// Begin play. Accepted from `NotStarted` or `Ended` (which reinitialises
    /// first); returns false and changes nothing otherwise.
    fn start(&mut self) -> bool;

    /// Reinitialise every entity and return to `NotStarted`
    fn restart(&mut self);

    /// The game's primary button
    fn on_action(&mut self) {
        self.start();
    }

    /// Advance one tick using input captured before the tick
    fn tick(&mut self, input: &InputSnapshot);

    /// Owned, point-in-time view for rendering
    fn snapshot(&self) -> Self::Snapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_start_rules() {
        assert!(GamePhase::NotStarted.can_start());
        assert!(GamePhase::Ended.can_start());
        assert!(!GamePhase::Running.can_start());
        assert!(!GamePhase::Paused.can_start());
        assert_eq!(GamePhase::default(), GamePhase::NotStarted);
    }
}
