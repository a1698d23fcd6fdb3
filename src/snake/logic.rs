//! Snake game logic: movement, turn queueing, collision detection and food.

use super::types::*;
use crate::core::config::{ConfigError, GameConfig};
use crate::display::encoder::encode;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;

/// What a single [`Engine::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved one cell.
    Continued { ate_food: bool },
    /// The snake hit a wall or itself; the run ended and a fresh one began.
    Restarted(RunSummary),
}

/// Final state of a run that ended in a collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Food eaten during the run
    pub score: u32,
    /// Encoded board as it looked at the moment of the crash
    pub bitmap: String,
    /// Snake length at the crash
    pub length: usize,
    /// Ticks survived
    pub ticks: u64,
    /// Whether the player steered at all during the run
    pub has_moved: bool,
}

/// The whole simulation: grid, snake, heading and pending turns.
///
/// Death is never observable from outside. [`Engine::step`] folds a
/// collision straight into a fresh [`Engine::start`] and reports the finished
/// run through [`StepOutcome::Restarted`].
#[derive(Debug, Clone)]
pub struct Engine<R> {
    config: GameConfig,
    grid: Grid,
    /// Snake body segments. Head is at the front (index 0).
    snake: VecDeque<Position>,
    /// Direction applied on the last tick.
    direction: Direction,
    /// Turns requested since the last tick, most recent at the back.
    pending: VecDeque<Direction>,
    has_moved: bool,
    run_ticks: u64,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Validate `config` and start the first run.
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            grid: Grid::new(config.width, config.height),
            snake: VecDeque::with_capacity(config.capacity()),
            direction: Direction::Right,
            pending: VecDeque::with_capacity(config.max_pending_directions),
            has_moved: false,
            run_ticks: 0,
            config,
            rng,
        };
        engine.start();
        Ok(engine)
    }

    /// Reset to the initial board: a horizontal snake in the middle row with
    /// its tail against the left wall, heading right, and one piece of food.
    pub fn start(&mut self) {
        self.grid.clear();
        self.snake.clear();

        let row = self.config.height / 2;
        let length = self.config.initial_length as i16;
        for x in (0..length).rev() {
            let segment = Position::new(x, row);
            self.grid.set(segment, Cell::Snake);
            self.snake.push_back(segment);
        }

        self.direction = Direction::Right;
        self.pending.clear();
        self.has_moved = false;
        self.run_ticks = 0;
        self.place_food();
    }

    /// Advance the simulation by exactly one tick.
    pub fn step(&mut self) -> StepOutcome {
        // One turn per tick: the most recent request wins, older ones are dropped.
        if let Some(turn) = self.pending.pop_back() {
            self.direction = turn;
            self.pending.clear();
        }

        let tail = self.tail();
        let candidate = self.head().offset(self.direction);

        // The tail is exempt because it vacates its cell this same tick.
        let crashed = !self.grid.contains(candidate)
            || (self.grid.get(candidate) == Cell::Snake && candidate != tail);
        if crashed {
            let summary = self.summarize();
            self.start();
            return StepOutcome::Restarted(summary);
        }

        let ate_food = self.grid.get(candidate) == Cell::Food;
        if !ate_food {
            self.snake.pop_back();
            self.grid.set(tail, Cell::Empty);
        }
        self.grid.set(candidate, Cell::Snake);
        self.snake.push_front(candidate);
        if ate_food {
            self.place_food();
        }

        self.run_ticks += 1;
        StepOutcome::Continued { ate_food }
    }

    /// Queue a turn for the next tick.
    ///
    /// A request that exactly reverses the most recently queued direction (or
    /// the current heading, if nothing is queued) is ignored. Any request,
    /// accepted or not, marks the run as one the player engaged with.
    pub fn change_direction(&mut self, requested: Direction) {
        self.has_moved = true;

        let last = self.pending.back().copied().unwrap_or(self.direction);
        if requested == last.opposite() {
            return;
        }
        if self.pending.len() == self.config.max_pending_directions {
            self.pending.pop_front();
        }
        self.pending.push_back(requested);
    }

    /// Drop a piece of food on a uniformly chosen empty cell.
    ///
    /// Draws an index among the empty cells and walks the grid in row-major
    /// order until it is reached. A grid completely filled by the snake gets
    /// no food, which is a valid state to keep playing in.
    fn place_food(&mut self) {
        let empty = self.grid.count(Cell::Empty);
        debug_assert_eq!(
            empty + self.snake.len() + self.grid.count(Cell::Food),
            self.config.capacity()
        );
        if empty == 0 {
            return;
        }

        let chosen = self.rng.gen_range(0..empty);
        let target = self
            .grid
            .positions()
            .filter(|&pos| self.grid.get(pos) == Cell::Empty)
            .nth(chosen);
        if let Some(pos) = target {
            self.grid.set(pos, Cell::Food);
        }
    }

    fn summarize(&self) -> RunSummary {
        RunSummary {
            score: self.score(),
            bitmap: encode(&self.grid),
            length: self.snake.len(),
            ticks: self.run_ticks,
            has_moved: self.has_moved,
        }
    }

    /// Move the food to `pos`. Refused for cells off the grid or under the snake.
    pub fn place_food_at(&mut self, pos: Position) -> bool {
        if !self.grid.contains(pos) || self.grid.get(pos) == Cell::Snake {
            return false;
        }
        if let Some(old) = self.grid.find(Cell::Food) {
            self.grid.set(old, Cell::Empty);
        }
        self.grid.set(pos, Cell::Food);
        true
    }
}

impl<R> Engine<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Segments from head to tail.
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn tail(&self) -> Position {
        self.snake[self.snake.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turns waiting for the next tick, oldest first.
    pub fn pending_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.iter().copied()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn food(&self) -> Option<Position> {
        self.grid.find(Cell::Food)
    }

    /// Ticks survived in the current run.
    pub fn run_ticks(&self) -> u64 {
        self.run_ticks
    }

    pub fn score(&self) -> u32 {
        (self.snake.len() - self.config.initial_length) as u32
    }

    /// Time to wait before the next tick; shrinks as the snake grows.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.snake.len())
    }
}
