//! urlsnake - a snake game drawn in braille, one address-bar string per tick.
//!
//! This module exposes the game logic for testing and external use.

pub mod core;
pub mod display;
pub mod high_score;
pub mod input;
pub mod simulator;
pub mod snake;
pub mod ui;
pub mod utils;
pub mod web;

pub use crate::core::{ConfigError, GameConfig, GameLoop, TickDriver, TickResult};
pub use display::{encode, Frame};
pub use high_score::{HighScore, ScoreBoard};
pub use snake::{Cell, Direction, Engine, Grid, Position, RunSummary, StepOutcome};
