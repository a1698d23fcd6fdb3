//! Integration test: Engine scenarios
//!
//! Drives the snake engine through whole runs on the default 40x4 board:
//! movement, growth, turn queueing, collisions and the restart that follows.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use urlsnake::display::encode;
use urlsnake::{Cell, Direction, Engine, GameConfig, Position, StepOutcome};

fn new_engine(seed: u64) -> Engine<ChaCha8Rng> {
    let mut engine = Engine::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(seed))
        .expect("default config is valid");
    // Keep food off the middle row unless a test puts it there.
    assert!(engine.place_food_at(Position::new(39, 0)));
    engine
}

fn body(engine: &Engine<ChaCha8Rng>) -> Vec<(i16, i16)> {
    engine.snake().iter().map(|p| (p.x, p.y)).collect()
}

// =============================================================================
// Movement and growth
// =============================================================================

#[test]
fn test_first_step_moves_right() {
    let mut engine = new_engine(1);
    assert_eq!(body(&engine), vec![(3, 2), (2, 2), (1, 2), (0, 2)]);

    let outcome = engine.step();

    assert_eq!(outcome, StepOutcome::Continued { ate_food: false });
    assert_eq!(body(&engine), vec![(4, 2), (3, 2), (2, 2), (1, 2)]);
    assert_eq!(engine.grid().get(Position::new(0, 2)), Cell::Empty);
    assert_eq!(engine.grid().count(Cell::Snake), 4);
}

#[test]
fn test_eating_grows_and_respawns_food() {
    let mut engine = new_engine(2);
    assert!(engine.place_food_at(Position::new(4, 2)));

    let outcome = engine.step();

    assert_eq!(outcome, StepOutcome::Continued { ate_food: true });
    assert_eq!(
        body(&engine),
        vec![(4, 2), (3, 2), (2, 2), (1, 2), (0, 2)]
    );
    assert_eq!(engine.score(), 1);
    assert_eq!(engine.grid().count(Cell::Food), 1);
    let food = engine.food().expect("food respawned");
    assert!(!engine.snake().contains(&food));
}

#[test]
fn test_length_never_decreases_within_a_run() {
    let mut engine = Engine::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(3))
        .expect("default config is valid");
    let mut last_len = engine.snake().len();
    let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Right];

    for tick in 0..30 {
        if tick % 3 == 0 {
            engine.change_direction(turns[(tick / 3) % turns.len()]);
        }
        match engine.step() {
            StepOutcome::Continued { .. } => {
                assert!(engine.snake().len() >= last_len);
                last_len = engine.snake().len();
            }
            StepOutcome::Restarted(_) => break,
        }
    }
}

#[test]
fn test_grid_and_body_agree_every_tick() {
    let mut engine = Engine::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(4))
        .expect("default config is valid");
    let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Right];

    for tick in 0..200 {
        if tick % 2 == 0 {
            engine.change_direction(turns[(tick / 2) % turns.len()]);
        }
        engine.step();

        assert_eq!(engine.grid().count(Cell::Snake), engine.snake().len());
        for pos in engine.snake() {
            assert_eq!(engine.grid().get(*pos), Cell::Snake);
        }
        assert!(engine.grid().count(Cell::Food) <= 1);
    }
}

// =============================================================================
// Turn queueing
// =============================================================================

#[test]
fn test_reversal_is_ignored() {
    let mut engine = new_engine(5);
    engine.change_direction(Direction::Left);
    engine.step();

    assert_eq!(engine.direction(), Direction::Right);
    assert_eq!(engine.head(), Position::new(4, 2));
    assert!(engine.has_moved());
}

#[test]
fn test_turn_then_reverse_keeps_queued_turn() {
    let mut engine = new_engine(6);
    engine.change_direction(Direction::Up);
    engine.change_direction(Direction::Down);

    assert_eq!(
        engine.pending_directions().collect::<Vec<_>>(),
        vec![Direction::Up]
    );
    engine.step();
    assert_eq!(engine.head(), Position::new(3, 1));
}

#[test]
fn test_only_latest_turn_applies_each_tick() {
    let mut engine = new_engine(7);
    engine.change_direction(Direction::Up);
    engine.change_direction(Direction::Right);
    engine.step();

    assert_eq!(engine.direction(), Direction::Right);
    assert_eq!(engine.head(), Position::new(4, 2));
    assert_eq!(engine.pending_directions().count(), 0);
}

// =============================================================================
// Collisions and restart
// =============================================================================

#[test]
fn test_right_wall_restarts_same_tick() {
    let mut engine = new_engine(8);

    // Head starts at x = 3; x = 39 is the last column.
    for _ in 0..36 {
        assert!(matches!(engine.step(), StepOutcome::Continued { .. }));
    }
    assert_eq!(engine.head(), Position::new(39, 2));

    match engine.step() {
        StepOutcome::Restarted(summary) => {
            assert_eq!(summary.score, 0);
            assert_eq!(summary.ticks, 36);
            assert!(!summary.has_moved);
            assert_eq!(summary.bitmap.chars().count(), 20);
        }
        other => panic!("expected a restart, got {other:?}"),
    }

    // Fresh board, not a wrapped snake
    assert_eq!(body(&engine), vec![(3, 2), (2, 2), (1, 2), (0, 2)]);
    assert_eq!(engine.direction(), Direction::Right);
    assert!(!engine.has_moved());
    assert_eq!(engine.run_ticks(), 0);
    assert_eq!(engine.grid().count(Cell::Food), 1);
}

#[test]
fn test_top_wall_restarts() {
    let mut engine = new_engine(9);
    engine.change_direction(Direction::Up);

    assert!(matches!(engine.step(), StepOutcome::Continued { .. }));
    assert!(matches!(engine.step(), StepOutcome::Continued { .. }));
    assert_eq!(engine.head(), Position::new(3, 0));

    let outcome = engine.step();
    assert!(matches!(outcome, StepOutcome::Restarted(ref s) if s.has_moved));
    assert_eq!(engine.head(), Position::new(3, 2));
}

#[test]
fn test_summary_bitmap_shows_board_before_reset() {
    let mut engine = new_engine(10);
    engine.change_direction(Direction::Down);
    engine.step();
    // Head at (3,3); the board at the crash is what this frame shows.
    let before_crash = encode(engine.grid());

    match engine.step() {
        StepOutcome::Restarted(summary) => assert_eq!(summary.bitmap, before_crash),
        other => panic!("expected a restart, got {other:?}"),
    }
    assert_ne!(encode(engine.grid()), before_crash);
}

#[test]
fn test_self_collision_restarts() {
    let mut engine = new_engine(11);
    // Grow to length 6 so a tight loop bites the body rather than the tail.
    assert!(engine.place_food_at(Position::new(4, 2)));
    engine.step();
    assert!(engine.place_food_at(Position::new(5, 2)));
    engine.step();
    assert!(engine.place_food_at(Position::new(39, 0)));
    assert_eq!(engine.snake().len(), 6);

    engine.change_direction(Direction::Up);
    engine.step();
    engine.change_direction(Direction::Left);
    engine.step();
    engine.change_direction(Direction::Down);

    match engine.step() {
        StepOutcome::Restarted(summary) => {
            assert_eq!(summary.score, 2);
            assert_eq!(summary.length, 6);
        }
        other => panic!("expected a restart, got {other:?}"),
    }
}

#[test]
fn test_chasing_tail_never_collides() {
    // A length-4 snake circling a 2x2 block always steps onto its own tail.
    let mut engine = new_engine(12);
    engine.change_direction(Direction::Up);
    engine.step();
    let circuit = [Direction::Left, Direction::Down, Direction::Right, Direction::Up];

    for lap in 0..10 {
        for direction in circuit {
            engine.change_direction(direction);
            assert!(
                matches!(engine.step(), StepOutcome::Continued { .. }),
                "collided on lap {lap} heading {direction:?}"
            );
        }
    }
    assert_eq!(engine.snake().len(), 4);
}
