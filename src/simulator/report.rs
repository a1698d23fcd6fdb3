//! Simulation results.

/// One finished (or cut-off) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub seed: Option<u64>,
    pub score: u32,
    pub ticks: u64,
    /// Board at the crash, or at the cut-off
    pub bitmap: String,
    /// False if the run hit the tick limit instead of crashing
    pub crashed: bool,
}

/// Aggregate over all runs of a batch.
#[derive(Debug, Clone, Default)]
pub struct SimReport {
    pub runs: Vec<RunRecord>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunRecord>) -> Self {
        Self { runs }
    }

    pub fn mean_score(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: u64 = self.runs.iter().map(|r| u64::from(r.score)).sum();
        total as f64 / self.runs.len() as f64
    }

    /// The highest-scoring run; the earliest one wins ties.
    pub fn best(&self) -> Option<&RunRecord> {
        self.runs
            .iter()
            .rev()
            .max_by_key(|r| r.score)
    }

    pub fn mean_ticks(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: u64 = self.runs.iter().map(|r| r.ticks).sum();
        total as f64 / self.runs.len() as f64
    }

    pub fn summary_line(&self) -> String {
        match self.best() {
            Some(best) => format!(
                "runs={} mean_score={:.2} mean_ticks={:.1} best={} #|{}|",
                self.runs.len(),
                self.mean_score(),
                self.mean_ticks(),
                best.score,
                best.bitmap
            ),
            None => "runs=0".to_string(),
        }
    }
}
