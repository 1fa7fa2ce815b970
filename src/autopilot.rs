//! Demo/attract mode players
//!
//! These read a snapshot and answer with the keys a player would press,
//! so they exercise exactly the same input path as a human.

use glam::IVec2;

use crate::input::{Direction, Key};
use crate::sim::{PongSnapshot, SnakeSnapshot};

/// Key to hold for the left paddle: chase the ball when it is incoming,
/// drift back to center otherwise
pub fn pong_key(snapshot: &PongSnapshot) -> Option<Key> {
    let paddle = snapshot.player;
    let target = if snapshot.ball.vel.x < 0.0 {
        snapshot.ball.pos.y
    } else {
        snapshot.board.y / 2.0
    };
    let tolerance = paddle.height / 4.0;
    let center = paddle.center_y();
    if center < target - tolerance {
        Some(Key::Down)
    } else if center > target + tolerance {
        Some(Key::Up)
    } else {
        None
    }
}

/// Turn to request this tick, if any: head for the food along safe cells,
/// keep going straight on ties
pub fn snake_turn(snapshot: &SnakeSnapshot) -> Option<Direction> {
    let head = *snapshot.segments.first()?;
    let g = snapshot.grid_size as i32;
    let target = snapshot.food.unwrap_or(head);
    let safe = |cell: IVec2| {
        (0..g).contains(&cell.x) && (0..g).contains(&cell.y) && !snapshot.segments.contains(&cell)
    };

    let best = Direction::ALL
        .into_iter()
        .filter(|&d| d != snapshot.heading.opposite())
        .filter(|&d| safe(head + d.delta()))
        .min_by_key(|&d| {
            let dist = (head + d.delta() - target).abs();
            (dist.x + dist.y, d != snapshot.heading)
        })?;

    (best != snapshot.heading).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{PongConfig, SnakeConfig};
    use crate::sim::{Engine, GamePhase, PongEngine, SnakeEngine};

    #[test]
    fn test_pong_chases_incoming_ball() {
        let engine = PongEngine::with_seed(PongConfig::default(), 1).unwrap();
        let mut snapshot = engine.snapshot();

        snapshot.ball.vel.x = -4.0;
        snapshot.ball.pos.y = 500.0;
        assert_eq!(pong_key(&snapshot), Some(Key::Down));
        snapshot.ball.pos.y = 50.0;
        assert_eq!(pong_key(&snapshot), Some(Key::Up));

        // Outgoing ball: already centered, stay put
        snapshot.ball.vel.x = 4.0;
        assert_eq!(pong_key(&snapshot), None);
    }

    #[test]
    fn test_snake_heads_for_food() {
        let engine = SnakeEngine::with_seed(SnakeConfig::default(), 1).unwrap();
        let mut snapshot = engine.snapshot();
        snapshot.phase = GamePhase::Running;

        // Food at (15,15), head at (10,10) heading right: straight ahead is fine
        assert_eq!(snake_turn(&snapshot), None);

        snapshot.segments = vec![IVec2::new(15, 10)];
        assert_eq!(snake_turn(&snapshot), Some(Direction::Down));
    }

    #[test]
    fn test_snake_avoids_wall() {
        let engine = SnakeEngine::with_seed(SnakeConfig::default(), 1).unwrap();
        let mut snapshot = engine.snapshot();
        snapshot.segments = vec![IVec2::new(19, 0)];
        snapshot.food = Some(IVec2::new(19, 0));
        let turn = snake_turn(&snapshot);
        assert_eq!(turn, Some(Direction::Down));
    }

    #[test]
    fn test_autopilot_snake_eats() {
        let mut engine = SnakeEngine::with_seed(SnakeConfig::default(), 5).unwrap();
        engine.start();
        for _ in 0..400 {
            if engine.phase() != GamePhase::Running {
                break;
            }
            if let Some(turn) = snake_turn(&engine.snapshot()) {
                engine.steer(turn);
            }
            engine.tick(&Default::default());
        }
        assert!(engine.score() >= 30, "score {}", engine.score());
    }
}
