//! The snake simulation: grid state, movement, growth and restart.

pub mod logic;
pub mod types;

pub use logic::{Engine, RunSummary, StepOutcome};
pub use types::{Cell, Direction, Grid, Position};
