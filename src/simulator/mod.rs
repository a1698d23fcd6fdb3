//! Headless simulator: seeded games steered by a simple autopilot.
//!
//! Useful for checking the engine end to end (growth, crashes, restarts and
//! the speed curve) without a terminal, and for producing sample bitmaps.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::choose_direction;
pub use config::SimConfig;
pub use report::{RunRecord, SimReport};
pub use runner::run_simulation;
