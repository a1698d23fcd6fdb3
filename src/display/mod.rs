//! Turning the grid into a line of braille glyphs and delivering it.

pub mod encoder;
pub mod sink;

pub use encoder::{decode_symbol, display_string, encode, encode_cells, symbol, BRAILLE_BASE};
pub use sink::{DisplaySink, FallbackSink, MemorySink, SinkError, TitleSink};

/// One rendered tick, ready for any sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Braille payload, one glyph per 2x4 block of cells
    pub bitmap: String,
    /// Score at the time the frame was taken
    pub score: u32,
    /// Bitmap wrapped for the address bar, e.g. `#|⣿⠀|[score:3]`
    pub text: String,
}

impl Frame {
    pub fn new(bitmap: String, score: u32) -> Self {
        let text = display_string(&bitmap, score);
        Self {
            bitmap,
            score,
            text,
        }
    }
}
