//! Engine tuning and settings file
//!
//! Each engine takes its config at construction. `Settings` bundles both
//! so a host can keep them in one JSON file.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Ball-and-paddle tuning. Speeds are pixels per tick at `tick_rate_hz`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub board_width: f32,
    pub board_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a board edge and the outer face of its paddle
    pub paddle_inset: f32,
    pub paddle_speed: f32,

    pub ball_radius: f32,
    pub serve_speed: f32,
    pub max_ball_speed: f32,
    pub paddle_speedup: f32,
    pub deflection_range: f32,

    pub opponent_dead_zone: f32,
    pub opponent_speed_factor: f32,

    pub winning_score: u32,
    pub tick_rate_hz: u32,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            serve_speed: BALL_SERVE_SPEED,
            max_ball_speed: BALL_MAX_SPEED,
            paddle_speedup: PADDLE_SPEEDUP,
            deflection_range: DEFLECTION_RANGE,
            opponent_dead_zone: OPPONENT_DEAD_ZONE,
            opponent_speed_factor: OPPONENT_SPEED_FACTOR,
            winning_score: WINNING_SCORE,
            tick_rate_hz: PONG_TICK_HZ,
        }
    }
}

impl PongConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.board_width, self.board_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidBoard { width, height });
        }

        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        non_negative("paddle_inset", self.paddle_inset)?;
        let span = 2.0 * (self.paddle_inset + self.paddle_width);
        if self.paddle_height > height || span >= width {
            return Err(ConfigError::PaddlesDoNotFit {
                paddle_width: self.paddle_width,
                paddle_height: self.paddle_height,
                inset: self.paddle_inset,
                width,
                height,
            });
        }

        positive("ball_radius", self.ball_radius)?;
        if 2.0 * self.ball_radius >= height {
            return Err(ConfigError::BallDoesNotFit {
                radius: self.ball_radius,
                height,
            });
        }

        positive("paddle_speed", self.paddle_speed)?;
        positive("serve_speed", self.serve_speed)?;
        positive("max_ball_speed", self.max_ball_speed)?;
        positive("opponent_speed_factor", self.opponent_speed_factor)?;
        non_negative("deflection_range", self.deflection_range)?;
        non_negative("opponent_dead_zone", self.opponent_dead_zone)?;

        if !(self.paddle_speedup.is_finite() && self.paddle_speedup >= 1.0) {
            return Err(ConfigError::SpeedupBelowOne(self.paddle_speedup));
        }

        let limit = self.paddle_width + 2.0 * self.ball_radius;
        if self.max_ball_speed > limit {
            return Err(ConfigError::BallOutrunsPaddle {
                max_speed: self.max_ball_speed,
                limit,
            });
        }

        if self.serve_speed > self.max_ball_speed {
            return Err(ConfigError::ServeTooFast {
                serve_speed: self.serve_speed,
                max_speed: self.max_ball_speed,
            });
        }

        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroRate("tick_rate_hz"));
        }
        Ok(())
    }

    /// Duration of one simulation step
    pub fn tick_step(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }

    /// Opponent movement per tick
    pub fn opponent_speed(&self) -> f32 {
        self.paddle_speed * self.opponent_speed_factor
    }
}

/// Growing-trail grid tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Cells per side of the square grid
    pub grid_size: u32,
    pub tick_interval_ms: u64,
    /// Points per food eaten
    pub reward: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_interval_ms: SNAKE_TICK_MS,
            reward: FOOD_REWARD,
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::InvalidGrid {
                got: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroRate("tick_interval_ms"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Both engines' configuration, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pong: PongConfig,
    pub snake: SnakeConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pong.validate()?;
        self.snake.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        let pong = PongConfig::default();
        assert_eq!(pong.board_width, 800.0);
        assert_eq!(pong.board_height, 600.0);
        assert_eq!(pong.winning_score, 5);
        let snake = SnakeConfig::default();
        assert_eq!(snake.grid_size, 20);
        assert_eq!(snake.tick_interval(), Duration::from_millis(150));
        assert_eq!(snake.reward, 10);
    }

    #[test]
    fn test_rejects_zero_winning_score() {
        let config = PongConfig {
            winning_score: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWinningScore)));
    }

    #[test]
    fn test_rejects_board_too_small_for_paddles() {
        let config = PongConfig {
            board_width: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddlesDoNotFit { .. })
        ));

        let config = PongConfig {
            board_height: 80.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddlesDoNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_board() {
        let config = PongConfig {
            board_height: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBoard { .. })));

        let config = PongConfig {
            board_width: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBoard { .. })));
    }

    #[test]
    fn test_rejects_tunneling_speed_cap() {
        let config = PongConfig {
            max_ball_speed: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BallOutrunsPaddle { .. })
        ));
    }

    #[test]
    fn test_rejects_serve_faster_than_cap() {
        let config = PongConfig {
            serve_speed: 30.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ServeTooFast { .. })
        ));

        let config = PongConfig {
            serve_speed: BALL_MAX_SPEED,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_slowdown_multiplier() {
        let config = PongConfig {
            paddle_speedup: 0.9,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SpeedupBelowOne(_))));
    }

    #[test]
    fn test_rejects_bad_grid() {
        for grid_size in [0, 1, MAX_GRID_SIZE + 1] {
            let config = SnakeConfig {
                grid_size,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidGrid { .. })));
        }

        let config = SnakeConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRate(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "snake": { "grid_size": 12 } }"#).unwrap();
        assert_eq!(settings.snake.grid_size, 12);
        assert_eq!(settings.snake.reward, FOOD_REWARD);
        assert_eq!(settings.pong, PongConfig::default());
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let result = Settings::from_json(r#"{ "pong": { "winning_score": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::ZeroWinningScore)));

        let result = Settings::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("arcade-sim-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.pong.winning_score = 7;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("arcade-sim-does-not-exist.json");
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }
}
