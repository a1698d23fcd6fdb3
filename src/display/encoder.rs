//! Braille bitmap encoding.
//!
//! Unicode braille patterns occupy the 256 code points from U+2800 to U+28FF.
//! Each glyph is a 2-wide, 4-tall block of dots whose bits run, from least to
//! most significant: ⠁⠂⠄⠈⠐⠠⡀⢀. The bottom row was added to the standard
//! 6-dot cell later, which is why it sits in the two high bits.

use crate::core::constants::{GLYPH_COLS, GLYPH_ROWS};
use crate::snake::types::{Grid, Position};

/// First code point of the braille block.
pub const BRAILLE_BASE: u32 = 0x2800;

/// Cell offsets within a block, indexed by bit position.
const DOT_OFFSETS: [(i16, i16); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (0, 3),
    (1, 3),
];

/// Encode the grid's occupancy as `width / 2` braille glyphs, left to right.
///
/// Snake and food cells are both drawn as raised dots. The grid must be
/// exactly four rows tall with an even width; `GameConfig::validate` rejects
/// anything else before a grid is ever built.
pub fn encode(grid: &Grid) -> String {
    debug_assert_eq!(grid.height(), GLYPH_ROWS);
    debug_assert_eq!(grid.width() % GLYPH_COLS, 0);
    encode_cells(grid.width(), |x, y| {
        grid.get(Position::new(x, y)).is_occupied()
    })
}

/// Encode any 4-row boolean image of the given width.
pub fn encode_cells<F>(width: i16, occupied: F) -> String
where
    F: Fn(i16, i16) -> bool,
{
    (0..width)
        .step_by(GLYPH_COLS as usize)
        .map(|x| {
            let bits = DOT_OFFSETS
                .iter()
                .enumerate()
                .filter(|&(_, &(dx, dy))| occupied(x + dx, dy))
                .fold(0u8, |acc, (bit, _)| acc | (1 << bit));
            symbol(bits)
        })
        .collect()
}

/// The braille glyph for an 8-bit dot pattern.
pub fn symbol(bits: u8) -> char {
    // Every value in 0x2800..=0x28FF is a valid scalar value.
    char::from_u32(BRAILLE_BASE + u32::from(bits)).unwrap_or('\u{2800}')
}

/// The dot pattern of a braille glyph, or `None` for any other character.
pub fn decode_symbol(glyph: char) -> Option<u8> {
    let offset = u32::from(glyph).checked_sub(BRAILLE_BASE)?;
    u8::try_from(offset).ok()
}

/// Wrap a bitmap for the address bar: `#|<bitmap>|`, plus `[score:n]` once
/// the player has scored.
pub fn display_string(bitmap: &str, score: u32) -> String {
    if score == 0 {
        format!("#|{}|", bitmap)
    } else {
        format!("#|{}|[score:{}]", bitmap, score)
    }
}
