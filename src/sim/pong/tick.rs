//! Fixed timestep simulation tick
//!
//! One call advances the board by exactly one step at the configured tick
//! rate. Speeds in `PongConfig` are per step, so the result does not depend
//! on how often the host renders.

use glam::Vec2;

use super::collision::{bounce_off_walls, exit_side, paddle_contact};
use super::state::{Ball, PongEngine, Side};
use crate::input::InputSnapshot;
use crate::rng::RandomSource;
use crate::sim::GamePhase;

impl<R: RandomSource> PongEngine<R> {
    /// Advance one tick. Does nothing unless running.
    pub(crate) fn step(&mut self, input: &InputSnapshot) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.ticks += 1;
        let height = self.config.board_height;

        // Paddles move before the ball
        let dy = input.vertical_axis() * self.config.paddle_speed;
        self.player.move_by(dy, height);
        self.opponent.track(
            self.ball.pos.y,
            self.config.opponent_dead_zone,
            self.config.opponent_speed(),
            height,
        );

        self.ball.pos += self.ball.vel;
        bounce_off_walls(&mut self.ball, height);

        if let Some(fraction) = paddle_contact(&self.ball, &self.player, Side::Player) {
            self.deflect(fraction, Side::Player);
        } else if let Some(fraction) = paddle_contact(&self.ball, &self.opponent, Side::Opponent) {
            self.deflect(fraction, Side::Opponent);
        }

        if let Some(scorer) = exit_side(&self.ball, self.config.board_width) {
            self.award_point(scorer);
        }
    }

    /// Send the ball back from `side`'s paddle, faster, angled by hit position
    fn deflect(&mut self, fraction: f32, side: Side) {
        let speed = (self.ball.vel.x.abs() * self.config.paddle_speedup)
            .min(self.config.max_ball_speed);
        if speed >= self.config.max_ball_speed {
            log::trace!("Ball speed capped at {}", speed);
        }
        self.ball.vel.x = speed * side.opposite().heading();
        self.ball.vel.y = (fraction - 0.5) * self.config.deflection_range;
    }

    fn award_point(&mut self, scorer: Side) {
        let total = self.score.award(scorer);
        log::debug!(
            "{:?} scores ({} - {})",
            scorer,
            self.score.player,
            self.score.opponent
        );

        if total >= self.config.winning_score {
            // Entities stay where they were on the winning tick
            self.phase = GamePhase::Ended;
            log::info!(
                "Pong over: {:?} wins {} - {}",
                scorer,
                self.score.player,
                self.score.opponent
            );
            return;
        }
        self.serve_toward(scorer);
    }

    /// Re-center the ball and launch it at `side`, away from whoever just
    /// conceded, with a random vertical component
    fn serve_toward(&mut self, side: Side) {
        let base = self.config.serve_speed;
        let dx = base * (0.75 + 0.5 * self.rng.next_unit());
        let sign = if self.rng.coin() { 1.0 } else { -1.0 };
        let dy = base * sign * (0.5 + 0.5 * self.rng.next_unit());

        self.ball = Ball {
            pos: Vec2::new(self.config.board_width / 2.0, self.config.board_height / 2.0),
            vel: Vec2::new(dx.min(self.config.max_ball_speed) * side.heading(), dy),
            radius: self.config.ball_radius,
        };
    }
}
