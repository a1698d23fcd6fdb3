//! Simulation configuration.

use crate::core::config::GameConfig;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Base random seed; run `i` uses `seed + i` (None = random)
    pub seed: Option<u64>,

    /// Ticks after which a run that has not crashed is cut off
    pub max_ticks_per_run: u64,

    /// Board and pacing parameters
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10,
            seed: Some(42),
            max_ticks_per_run: 10_000,
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// A single short seeded run, for tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 1,
            seed: Some(seed),
            max_ticks_per_run: 2_000,
            verbosity: 0,
            ..Default::default()
        }
    }
}
