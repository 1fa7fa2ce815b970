//! Fixed interval grid tick

use super::food::place_food;
use super::state::SnakeEngine;
use crate::rng::RandomSource;
use crate::sim::GamePhase;

impl<R: RandomSource> SnakeEngine<R> {
    /// Move one cell. Does nothing unless running.
    pub(crate) fn step(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let next = self.head() + self.pending.delta();
        if !self.in_bounds(next) || self.segments.contains(&next) {
            // Segments stay exactly as they were before the fatal move
            self.phase = GamePhase::Ended;
            log::info!(
                "Snake over at {:?}: score {}, length {}",
                next,
                self.score,
                self.segments.len()
            );
            return;
        }

        self.ticks += 1;
        self.heading = self.pending;
        self.segments.push_front(next);

        if self.food != Some(next) {
            self.segments.pop_back();
            return;
        }

        self.score = self.score.saturating_add(self.config.reward);
        self.food = place_food(&mut self.rng, self.config.grid_size, &self.segments);
        log::debug!(
            "Food eaten at {:?}: score {}, length {}, next food {:?}",
            next,
            self.score,
            self.segments.len(),
            self.food
        );
        if self.food.is_none() {
            self.phase = GamePhase::Ended;
            log::info!("Snake filled the grid: score {}", self.score);
        }
    }
}
