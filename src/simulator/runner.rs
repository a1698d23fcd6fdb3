//! Main simulation runner driving the real game loop.

use super::autopilot::choose_direction;
use super::config::SimConfig;
use super::report::{RunRecord, SimReport};
use crate::core::config::ConfigError;
use crate::core::game_loop::GameLoop;
use crate::high_score::{MemoryStore, ScoreBoard};
use crate::snake::logic::{Engine, StepOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Play `config.num_runs` games and collect the results.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    config.game.validate()?;
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = config.seed.map(|s| s.wrapping_add(u64::from(run_idx)));
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let record = simulate_single_run(config, rng, seed)?;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - score {}, ticks {}{}",
                run_idx + 1,
                config.num_runs,
                record.score,
                record.ticks,
                if record.crashed { "" } else { " (cut off)" }
            );
        }
        runs.push(record);
    }

    Ok(SimReport::from_runs(runs))
}

fn simulate_single_run(
    config: &SimConfig,
    rng: StdRng,
    seed: Option<u64>,
) -> Result<RunRecord, ConfigError> {
    let engine = Engine::new(config.game.clone(), rng)?;
    let scores = ScoreBoard::open(Box::new(MemoryStore::new()));
    let mut game = GameLoop::new(engine, scores);

    for _ in 0..config.max_ticks_per_run {
        let direction = choose_direction(game.engine());
        game.change_direction(direction);

        if let StepOutcome::Restarted(summary) = game.tick().outcome {
            debug!(?seed, score = summary.score, ticks = summary.ticks, "simulated run crashed");
            return Ok(RunRecord {
                seed,
                score: summary.score,
                ticks: summary.ticks,
                bitmap: summary.bitmap,
                crashed: true,
            });
        }
    }

    let engine = game.engine();
    Ok(RunRecord {
        seed,
        score: engine.score(),
        ticks: engine.run_ticks(),
        bitmap: game.frame().bitmap,
        crashed: false,
    })
}
