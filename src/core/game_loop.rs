//! Per-tick orchestration shared by the terminal host, the web host and the
//! headless simulator.
//!
//! The loop owns the engine, so every mutation (ticks and player input) goes
//! through one `&mut` handle and a turn requested between two ticks always
//! lands at the start of the next one.

use super::tick::TickDriver;
use crate::display::encoder::encode;
use crate::display::Frame;
use crate::high_score::ScoreBoard;
use crate::input::HostAction;
use crate::snake::logic::{Engine, StepOutcome};
use crate::snake::types::Direction;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of one game tick, for the presentation layer.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// The board after the tick (a fresh board if the run just ended)
    pub frame: Frame,
    pub outcome: StepOutcome,
    /// The run that just ended set a new record
    pub new_high_score: bool,
}

impl TickResult {
    pub fn restarted(&self) -> bool {
        matches!(self.outcome, StepOutcome::Restarted(_))
    }
}

/// Engine plus pacing plus the end-of-run hook.
pub struct GameLoop<R> {
    engine: Engine<R>,
    driver: TickDriver,
    scores: ScoreBoard,
    runs_finished: u64,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(engine: Engine<R>, scores: ScoreBoard) -> Self {
        Self {
            engine,
            driver: TickDriver::new(),
            scores,
            runs_finished: 0,
        }
    }

    /// Step the engine if the current interval has elapsed since the last
    /// tick. Call as often as convenient; at most one tick happens per call.
    pub fn poll(&mut self, now: Instant) -> Option<TickResult> {
        let interval = self.engine.tick_interval();
        if !self.driver.due(now, interval) {
            return None;
        }
        Some(self.tick())
    }

    /// Step the engine unconditionally.
    pub fn tick(&mut self) -> TickResult {
        let outcome = self.engine.step();
        let mut new_high_score = false;

        if let StepOutcome::Restarted(summary) = &outcome {
            self.runs_finished += 1;
            new_high_score = self.scores.record_run(summary);
            info!(
                run = self.runs_finished,
                score = summary.score,
                ticks = summary.ticks,
                has_moved = summary.has_moved,
                new_high_score,
                "run ended"
            );
        }

        TickResult {
            frame: self.frame(),
            outcome,
            new_high_score,
        }
    }

    /// Apply a host action. Returns false when the host should shut down.
    pub fn apply(&mut self, action: HostAction) -> bool {
        match action {
            HostAction::Turn(direction) => self.change_direction(direction),
            HostAction::TogglePause => self.driver.toggle_paused(),
            HostAction::Pause => self.driver.set_paused(true),
            HostAction::Resume => self.driver.set_paused(false),
            HostAction::Quit => return false,
        }
        true
    }

    pub fn change_direction(&mut self, direction: Direction) {
        self.engine.change_direction(direction);
    }
}

impl<R> GameLoop<R> {
    /// The current board, encoded.
    pub fn frame(&self) -> Frame {
        Frame::new(encode(self.engine.grid()), self.engine.score())
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<R> {
        &mut self.engine
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn is_paused(&self) -> bool {
        self.driver.is_paused()
    }

    /// Runs that have ended since the loop was created.
    pub fn runs_finished(&self) -> u64 {
        self.runs_finished
    }

    /// How long the host may block waiting for input before the next tick.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.driver.time_until_due(now, self.engine.tick_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::high_score::MemoryStore;
    use crate::snake::types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_loop() -> GameLoop<ChaCha8Rng> {
        let engine =
            Engine::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(2024)).unwrap();
        let scores = ScoreBoard::open(Box::new(MemoryStore::new()));
        let mut game = GameLoop::new(engine, scores);
        assert!(game.engine_mut().place_food_at(Position::new(39, 0)));
        game
    }

    #[test]
    fn test_poll_respects_interval() {
        let mut game = create_test_loop();
        let start = Instant::now();
        assert!(game.poll(start).is_some());
        assert!(game.poll(start + Duration::from_millis(10)).is_none());
        assert!(game.poll(start + Duration::from_millis(125)).is_some());
        assert_eq!(game.engine().head(), Position::new(5, 2));
    }

    #[test]
    fn test_paused_loop_does_not_tick() {
        let mut game = create_test_loop();
        assert!(game.apply(HostAction::Pause));
        assert!(game.poll(Instant::now()).is_none());
        assert!(game.apply(HostAction::TogglePause));
        assert!(game.poll(Instant::now()).is_some());
    }

    #[test]
    fn test_quit_action() {
        let mut game = create_test_loop();
        assert!(!game.apply(HostAction::Quit));
    }

    #[test]
    fn test_frame_matches_board() {
        let mut game = create_test_loop();
        let result = game.tick();
        assert_eq!(result.frame.bitmap, encode(game.engine().grid()));
        assert_eq!(result.frame.text, format!("#|{}|", result.frame.bitmap));
        assert!(!result.restarted());
    }

    #[test]
    fn test_crash_records_high_score() {
        let mut game = create_test_loop();
        assert!(game.engine_mut().place_food_at(Position::new(4, 2)));
        game.tick(); // eat: score 1
        assert!(game.engine_mut().place_food_at(Position::new(39, 0)));

        game.apply(HostAction::Turn(Direction::Down));
        game.tick(); // (4,3)
        let result = game.tick(); // off the bottom

        assert!(result.restarted());
        assert!(result.new_high_score);
        assert_eq!(game.scores().best().best_score, 1);
        assert_eq!(game.runs_finished(), 1);
        assert_eq!(result.frame.score, 0);
    }

    #[test]
    fn test_crash_without_steering_is_not_recorded() {
        let mut game = create_test_loop();
        assert!(game.engine_mut().place_food_at(Position::new(4, 2)));
        let mut ended = None;
        for _ in 0..40 {
            let result = game.tick();
            if result.restarted() {
                ended = Some(result);
                break;
            }
        }
        let result = ended.expect("snake should hit the right wall");
        assert!(!result.new_high_score);
        assert_eq!(game.scores().best().best_score, 0);
    }
}
