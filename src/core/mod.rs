//! Core configuration, pacing and the per-tick orchestration loop.

pub mod config;
pub mod constants;
pub mod game_loop;
pub mod tick;

pub use config::{ConfigError, GameConfig};
pub use constants::*;
pub use game_loop::{GameLoop, TickResult};
pub use tick::TickDriver;
