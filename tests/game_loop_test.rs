//! Integration test: Game loop and display delivery
//!
//! Runs the loop the way a host does (poll, show the frame, feed input back)
//! and checks pacing, pausing and what ends up in the address bar.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use urlsnake::display::{
    decode_symbol, DisplaySink, FallbackSink, MemorySink, SinkError, TitleSink,
};
use urlsnake::high_score::{MemoryStore, ScoreBoard};
use urlsnake::input::HostAction;
use urlsnake::{Direction, Engine, GameConfig, GameLoop, Position, TickResult};

fn create_loop(seed: u64) -> GameLoop<ChaCha8Rng> {
    let engine = Engine::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(seed))
        .expect("default config is valid");
    let mut game = GameLoop::new(engine, ScoreBoard::open(Box::new(MemoryStore::new())));
    assert!(game.engine_mut().place_food_at(Position::new(39, 0)));
    game
}

/// Poll every millisecond of simulated time for `total` and collect the ticks.
fn run_for(game: &mut GameLoop<ChaCha8Rng>, start: Instant, total: Duration) -> Vec<TickResult> {
    let mut results = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed <= total {
        if let Some(result) = game.poll(start + elapsed) {
            results.push(result);
        }
        elapsed += Duration::from_millis(1);
    }
    results
}

// =============================================================================
// Pacing
// =============================================================================

#[test]
fn test_ticks_follow_the_interval() {
    let mut game = create_loop(1);
    let start = Instant::now();

    // Length 4 on 160 cells: 123.75ms. Ticks at 0, 124, 248 and 372.
    let results = run_for(&mut game, start, Duration::from_millis(400));

    assert_eq!(results.len(), 4);
    assert_eq!(game.engine().head(), Position::new(7, 2));
}

#[test]
fn test_pause_freezes_the_board() {
    let mut game = create_loop(2);
    let start = Instant::now();
    assert!(game.poll(start).is_some());

    assert!(game.apply(HostAction::Pause));
    assert!(game.is_paused());
    let head = game.engine().head();
    for ms in (0..2000).step_by(50) {
        assert!(game.poll(start + Duration::from_millis(ms)).is_none());
    }
    assert_eq!(game.engine().head(), head);

    assert!(game.apply(HostAction::Resume));
    assert!(!game.is_paused());
    assert!(game.poll(start + Duration::from_millis(2000)).is_some());
}

#[test]
fn test_time_until_due_shrinks() {
    let mut game = create_loop(3);
    let start = Instant::now();
    assert_eq!(game.time_until_due(start), Duration::ZERO);

    game.poll(start);
    let interval = game.engine().tick_interval();
    assert_eq!(game.time_until_due(start), interval);
    assert_eq!(
        game.time_until_due(start + Duration::from_millis(100)),
        interval - Duration::from_millis(100)
    );
    assert_eq!(game.time_until_due(start + interval * 2), Duration::ZERO);
}

// =============================================================================
// Input between ticks
// =============================================================================

#[test]
fn test_turn_between_ticks_applies_on_next_tick() {
    let mut game = create_loop(4);
    let start = Instant::now();
    game.poll(start);
    assert_eq!(game.engine().head(), Position::new(4, 2));

    assert!(game.apply(HostAction::Turn(Direction::Up)));
    assert_eq!(game.engine().head(), Position::new(4, 2));

    let interval = game.engine().tick_interval();
    game.poll(start + interval);
    assert_eq!(game.engine().head(), Position::new(4, 1));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_every_tick_frame_reaches_sink() {
    let mut game = create_loop(5);
    let mut sink = MemorySink::new();
    let start = Instant::now();

    for result in run_for(&mut game, start, Duration::from_millis(1000)) {
        sink.show(&result.frame).expect("memory sink never fails");
    }

    let latest = sink.latest().expect("at least one frame");
    assert_eq!(latest.bitmap.chars().count(), 20);
    assert!(latest.text.starts_with("#|"));
    assert_eq!(latest, &game.frame());
    assert_eq!(sink.writes(), 9);
}

#[test]
fn test_frame_bitmap_shows_snake_and_food() {
    let game = create_loop(6);
    let frame = game.frame();
    let glyphs: Vec<char> = frame.bitmap.chars().collect();

    // Snake on row 2 from x = 0 to 3: bits for (x,2) and (x+1,2) in the
    // first two glyphs.
    assert_eq!(decode_symbol(glyphs[0]), Some(0b0010_0100));
    assert_eq!(decode_symbol(glyphs[1]), Some(0b0010_0100));
    // Food at (39,0) is the (x+1,0) dot of the last glyph.
    assert_eq!(decode_symbol(glyphs[19]), Some(0b0000_1000));
    assert!(glyphs[2..19].iter().all(|&g| g == '\u{2800}'));
    assert_eq!(frame.text, format!("#|{}|", frame.bitmap));
}

#[test]
fn test_score_suffix_after_eating() {
    let mut game = create_loop(7);
    assert!(game.engine_mut().place_food_at(Position::new(4, 2)));

    let result = game.tick();

    assert_eq!(result.frame.score, 1);
    assert!(result.frame.text.ends_with("|[score:1]"));
}

#[test]
fn test_throttled_title_falls_back() {
    let mut game = create_loop(8);
    let mut sink = FallbackSink::new(
        TitleSink::new(Vec::new(), Duration::from_secs(3600)),
        MemorySink::new(),
    );

    let first = game.tick().frame;
    sink.show(&first).expect("first title write goes through");
    let second = game.tick().frame;
    sink.show(&second).expect("fallback takes the frame");

    assert_eq!(sink.fallbacks(), 1);
    assert_eq!(sink.fallback().latest(), Some(&second));
}

#[test]
fn test_title_sink_writes_address_string() {
    let game = create_loop(9);
    let frame = game.frame();
    let mut sink = TitleSink::new(Vec::new(), Duration::from_millis(50));
    let now = Instant::now();

    sink.show_at(&frame, now).expect("first write allowed");
    assert!(matches!(
        sink.show_at(&frame, now + Duration::from_millis(10)),
        Err(SinkError::Throttled(_))
    ));
    sink.show_at(&frame, now + Duration::from_millis(50))
        .expect("interval elapsed");

    let written = String::from_utf8(sink.into_inner()).expect("title is utf-8");
    assert_eq!(written.matches(frame.text.as_str()).count(), 2);
}
