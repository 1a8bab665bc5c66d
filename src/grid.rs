//! Mapping between board coordinates and linearized square indices.
//!
//! Columns are `a`..`g` (0-based `0..7`) and rows are `1`..`7` (0-based
//! `0..7`). A square's index is its position in row-major order over the
//! padded 11x11 array, so row 1 sits at the low end of the array.

use crate::constants::{BORDER, EXTENDED_SIDE, SIDE};

/// A square on the board, represented as an index into the padded 1D array.
pub type Square = usize;

/// Return the linearized index of the square at 0-based column `col` and row `row`.
#[inline]
pub const fn index(col: usize, row: usize) -> Square {
    (row + BORDER) * EXTENDED_SIDE + (col + BORDER)
}

/// Return the 0-based column of a real square.
#[inline]
pub const fn col_of(sq: Square) -> usize {
    sq % EXTENDED_SIDE - BORDER
}

/// Return the 0-based row of a real square.
#[inline]
pub const fn row_of(sq: Square) -> usize {
    sq / EXTENDED_SIDE - BORDER
}

/// Return the index of the square `dc` columns and `dr` rows away from `sq`.
///
/// Any offset of at most 2 from a real square stays inside the padded array.
#[inline]
pub const fn neighbor(sq: Square, dc: isize, dr: isize) -> Square {
    (sq as isize + dc + dr * EXTENDED_SIDE as isize) as usize
}

/// Return true if `sq` lies inside the 7x7 playing area.
#[inline]
pub fn is_real(sq: Square) -> bool {
    let c = sq % EXTENDED_SIDE;
    let r = sq / EXTENDED_SIDE;
    (BORDER..BORDER + SIDE).contains(&c) && (BORDER..BORDER + SIDE).contains(&r)
}

/// Chebyshev distance between two squares (max of column and row distance).
#[inline]
pub fn chebyshev(a: Square, b: Square) -> usize {
    let dc = (a % EXTENDED_SIDE).abs_diff(b % EXTENDED_SIDE);
    let dr = (a / EXTENDED_SIDE).abs_diff(b / EXTENDED_SIDE);
    dc.max(dr)
}

/// Return the three reflections of a real square across the middle row and column,
/// together with the square itself.
pub fn reflections(sq: Square) -> [Square; 4] {
    let (c, r) = (col_of(sq), row_of(sq));
    let (mc, mr) = (SIDE - 1 - c, SIDE - 1 - r);
    [index(c, r), index(c, mr), index(mc, r), index(mc, mr)]
}

/// Return true if `sq` is one of the four corners of the real board.
pub fn is_corner(sq: Square) -> bool {
    let (c, r) = (col_of(sq), row_of(sq));
    (c == 0 || c == SIDE - 1) && (r == 0 || r == SIDE - 1)
}

/// Parse a square name such as `"b3"`.
///
/// Returns `None` unless the string is exactly a column letter `a`..`g`
/// followed by a row digit `1`..`7`.
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].to_ascii_lowercase().checked_sub(b'a')? as usize;
    let row = bytes[1].checked_sub(b'1')? as usize;
    if col >= SIDE || row >= SIDE {
        return None;
    }
    Some(index(col, row))
}

/// Convert a real square to its name (e.g. `"b3"`).
pub fn square_name(sq: Square) -> String {
    let c = (b'a' + col_of(sq) as u8) as char;
    let r = (b'1' + row_of(sq) as u8) as char;
    format!("{c}{r}")
}
