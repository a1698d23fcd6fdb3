//! A greedy snake driver: head for the food, never take an immediately fatal
//! step if a safe one exists.

use crate::snake::logic::Engine;
use crate::snake::types::{Cell, Direction, Position};

/// True if moving the head to `pos` would not end the run this tick.
fn is_safe<R>(engine: &Engine<R>, pos: Position) -> bool {
    let grid = engine.grid();
    grid.contains(pos) && (grid.get(pos) != Cell::Snake || pos == engine.tail())
}

fn distance(a: Position, b: Position) -> i32 {
    (i32::from(a.x) - i32::from(b.x)).abs() + (i32::from(a.y) - i32::from(b.y)).abs()
}

/// Pick the next heading.
///
/// Among the safe moves (never the reverse of the current heading), the one
/// that gets closest to the food wins, ties broken by `Direction::ALL` order.
/// With no food on the board the snake keeps going straight while it can.
/// When every move is fatal the current heading is kept.
pub fn choose_direction<R>(engine: &Engine<R>) -> Direction {
    let head = engine.head();
    let current = engine.direction();
    let food = engine.food();

    let safe = Direction::ALL
        .into_iter()
        .filter(|&d| d != current.opposite())
        .filter(|&d| is_safe(engine, head.offset(d)));

    let best = match food {
        Some(food) => safe.min_by_key(|&d| distance(head.offset(d), food)),
        None => safe.min_by_key(|&d| d != current),
    };
    best.unwrap_or(current)
}
