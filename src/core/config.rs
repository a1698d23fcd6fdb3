//! Game configuration and start-up validation.

use super::constants::*;
use std::time::Duration;
use thiserror::Error;

/// Precondition violations caught before a game is created.
///
/// These are integration mistakes rather than runtime events, so callers
/// abort start-up instead of trying to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width must be a positive even number, got {0}")]
    OddWidth(i16),
    #[error("grid height must be exactly 4, got {0}")]
    UnsupportedHeight(i16),
    #[error("initial snake of length {length} does not fit a grid {width} cells wide")]
    SnakeTooLong { length: usize, width: i16 },
    #[error("tick interval must shrink: start {start_ms}ms is not above end {end_ms}ms")]
    PacingNotDecreasing { start_ms: u64, end_ms: u64 },
}

/// Configuration for one game instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Grid width in cells (must be even)
    pub width: i16,

    /// Grid height in cells (must be 4)
    pub height: i16,

    /// Snake length at the start of every run
    pub initial_length: usize,

    /// Tick interval for an empty grid, in milliseconds
    pub tick_start_ms: u64,

    /// Tick interval the curve approaches as the snake fills the grid
    pub tick_end_ms: u64,

    /// How many not-yet-applied turns are remembered between ticks
    pub max_pending_directions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            initial_length: INITIAL_SNAKE_LENGTH,
            tick_start_ms: TICK_START_MS,
            tick_end_ms: TICK_END_MS,
            max_pending_directions: MAX_PENDING_DIRECTIONS,
        }
    }
}

impl GameConfig {
    /// A narrower board, handy for tests and quick simulations.
    pub fn with_width(width: i16) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Check every precondition the engine and the encoder rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.width % GLYPH_COLS != 0 {
            return Err(ConfigError::OddWidth(self.width));
        }
        if self.height != GLYPH_ROWS {
            return Err(ConfigError::UnsupportedHeight(self.height));
        }
        if self.initial_length == 0 || self.initial_length > self.width as usize {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                width: self.width,
            });
        }
        if self.tick_start_ms <= self.tick_end_ms {
            return Err(ConfigError::PacingNotDecreasing {
                start_ms: self.tick_start_ms,
                end_ms: self.tick_end_ms,
            });
        }
        Ok(())
    }

    /// Total number of cells on the grid.
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Tick interval for a snake of the given length.
    ///
    /// `start + length * (end - start) / capacity`, so a snake filling the
    /// whole grid would tick at `end`.
    pub fn tick_interval(&self, snake_length: usize) -> Duration {
        let start_us = self.tick_start_ms * 1000;
        let span_us = self.tick_start_ms.saturating_sub(self.tick_end_ms) * 1000;
        let length = snake_length.min(self.capacity()) as u64;
        let speedup_us = length * span_us / self.capacity() as u64;
        Duration::from_micros(start_us - speedup_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.capacity(), 160);
    }

    #[test]
    fn test_odd_width_rejected() {
        let config = GameConfig::with_width(39);
        assert_eq!(config.validate(), Err(ConfigError::OddWidth(39)));

        let config = GameConfig::with_width(0);
        assert_eq!(config.validate(), Err(ConfigError::OddWidth(0)));
    }

    #[test]
    fn test_height_must_be_four() {
        let config = GameConfig {
            height: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedHeight(5)));
    }

    #[test]
    fn test_snake_must_fit() {
        let config = GameConfig {
            width: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SnakeTooLong { length: 4, width: 2 })
        ));
    }

    #[test]
    fn test_pacing_must_decrease() {
        let config = GameConfig {
            tick_start_ms: 75,
            tick_end_ms: 125,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PacingNotDecreasing { .. })
        ));
    }

    #[test]
    fn test_tick_interval_curve() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(0), Duration::from_millis(125));
        // 125 - 50 * 4 / 160 = 123.75ms
        assert_eq!(config.tick_interval(4), Duration::from_micros(123_750));
        assert_eq!(config.tick_interval(160), Duration::from_millis(75));
        assert!(config.tick_interval(20) < config.tick_interval(10));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::OddWidth(7).to_string(),
            "grid width must be a positive even number, got 7"
        );
        assert_eq!(
            ConfigError::UnsupportedHeight(3).to_string(),
            "grid height must be exactly 4, got 3"
        );
    }
}
