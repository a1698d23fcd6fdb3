//! Best-score record: what counts as a new high score and where it is kept.

pub mod persistence;
pub mod types;

pub use persistence::{JsonFileStore, MemoryStore, ScoreStore};
pub use types::{HighScore, ScoreBoard};
