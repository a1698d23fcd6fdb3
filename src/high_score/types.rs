//! High-score record and the end-of-run rules that update it.

use super::persistence::ScoreStore;
use crate::snake::logic::RunSummary;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The single persisted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best_score: u32,
    /// Encoded board at the moment the best run crashed
    pub best_bitmap: String,
    /// RFC 3339 timestamp of when the record was set
    #[serde(default)]
    pub achieved_at: Option<String>,
}

impl HighScore {
    /// Whether `summary` beats this record.
    ///
    /// Only strict, non-zero improvements from runs where the player actually
    /// steered count; an untouched snake crashing into the right wall is not
    /// an achievement.
    pub fn is_beaten_by(&self, summary: &RunSummary) -> bool {
        summary.has_moved && summary.score > 0 && summary.score > self.best_score
    }
}

/// In-memory view of the record, backed by a [`ScoreStore`].
pub struct ScoreBoard {
    store: Box<dyn ScoreStore>,
    best: HighScore,
}

impl ScoreBoard {
    /// Load the record from `store`.
    ///
    /// Storage problems never stop the game: an unreadable record is logged
    /// and treated as a best score of zero.
    pub fn open(store: Box<dyn ScoreStore>) -> Self {
        let best = match store.load() {
            Ok(record) => record.unwrap_or_default(),
            Err(err) => {
                warn!(
                    store = %store.describe(),
                    %err,
                    "could not read high score, starting from zero"
                );
                HighScore::default()
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> &HighScore {
        &self.best
    }

    /// End-of-run hook. Returns true if the run set a new record.
    ///
    /// The in-memory record is updated even when writing it out fails.
    pub fn record_run(&mut self, summary: &RunSummary) -> bool {
        if !self.best.is_beaten_by(summary) {
            return false;
        }

        self.best = HighScore {
            best_score: summary.score,
            best_bitmap: summary.bitmap.clone(),
            achieved_at: Some(Utc::now().to_rfc3339()),
        };
        info!(score = summary.score, ticks = summary.ticks, "new high score");
        if let Err(err) = self.store.save(&self.best) {
            warn!(store = %self.store.describe(), %err, "could not save high score");
        }
        true
    }

    /// Forget the record, both in memory and in the store.
    pub fn reset(&mut self) -> std::io::Result<()> {
        self.best = HighScore::default();
        self.store.clear()
    }
}
