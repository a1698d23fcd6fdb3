// Grid geometry
pub const GRID_WIDTH: i16 = 40;
pub const GRID_HEIGHT: i16 = 4;
/// Rows the braille encoder packs into one glyph.
pub const GLYPH_ROWS: i16 = 4;
/// Columns the braille encoder packs into one glyph.
pub const GLYPH_COLS: i16 = 2;

// Snake
pub const INITIAL_SNAKE_LENGTH: usize = 4;
pub const MAX_PENDING_DIRECTIONS: usize = 3;

// Tick pacing: the interval shrinks linearly from start to end as the snake fills the grid
pub const TICK_START_MS: u64 = 125;
pub const TICK_END_MS: u64 = 75;

// Host loop
pub const FRAME_POLL_MS: u64 = 16; // roughly one display refresh
pub const TITLE_MIN_INTERVAL_MS: u64 = 50;
pub const DEFAULT_WEB_PORT: u16 = 3000;

// Persistence
pub const DATA_DIR_NAME: &str = ".urlsnake";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const LOG_FILE: &str = "urlsnake.log";
