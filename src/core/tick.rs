//! Wall-clock tick pacing.
//!
//! The host polls as often as it likes (once per display refresh in the
//! terminal, or whenever input arrives). The driver decides whether enough
//! time has passed for the next simulation step, given the engine's current
//! interval, and never fires more than once per poll.

use std::time::{Duration, Instant};

/// Decides when the next tick is due.
#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    last_tick: Option<Instant>,
    paused: bool,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true (and records `now`) if a tick should run.
    ///
    /// The first poll after construction always ticks. Paused drivers never
    /// tick, and pausing does not move the reference point, so the first poll
    /// after resuming ticks straight away if the interval has elapsed.
    pub fn due(&mut self, now: Instant, interval: Duration) -> bool {
        if self.paused {
            return false;
        }
        let due = match self.last_tick {
            Some(last) => now.saturating_duration_since(last) >= interval,
            None => true,
        };
        if due {
            self.last_tick = Some(now);
        }
        due
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time left until the next tick, for sizing an input poll timeout.
    pub fn time_until_due(&self, now: Instant, interval: Duration) -> Duration {
        match self.last_tick {
            Some(last) => interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
