//! Constants for board geometry, game rules, and search parameters.
//!
//! The board uses a 1D array representation with two layers of blocked
//! padding on every side, so that any square within two rows and columns of
//! a real square is still inside the array.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of squares on a side of the real board.
pub const SIDE: usize = 7;

/// Depth of the blocked border around the real board.
pub const BORDER: usize = 2;

/// Side length of the padded board (real side plus a 2-deep border each way).
pub const EXTENDED_SIDE: usize = SIDE + 2 * BORDER;

/// Total board array size including all padding.
pub const BOARDSIZE: usize = EXTENDED_SIDE * EXTENDED_SIDE;

/// Number of real (playable) squares.
pub const REAL_SQUARES: usize = SIDE * SIDE;

/// First real board index (a1).
pub const BOARD_IMIN: usize = BORDER * EXTENDED_SIDE + BORDER;

/// One past the last real board index (g7).
pub const BOARD_IMAX: usize = (BORDER + SIDE - 1) * EXTENDED_SIDE + BORDER + SIDE;

// =============================================================================
// Game Rules
// =============================================================================

/// Number of consecutive non-extending moves after which the game ends.
pub const JUMP_LIMIT: u32 = 25;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default number of recursive plies before the greedy evaluation takes over.
pub const MAX_DEPTH: u32 = 2;

/// Below this many empty squares the search only looks one ply ahead.
pub const ENDGAME_EMPTY: usize = 5;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Column/row offsets of the 8 squares at distance 1 (extend targets).
pub const EXTEND_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Column/row offsets of the 16 squares at distance 2 (jump targets).
pub const JUMP_OFFSETS: [(isize, isize); 16] = [
    (-2, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-2, 2),
    (-1, -2),
    (-1, 2),
    (0, -2),
    (0, 2),
    (1, -2),
    (1, 2),
    (2, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (2, 2),
];

// =============================================================================
// Cell Glyphs
// =============================================================================

/// Red piece.
pub const GLYPH_RED: char = 'r';

/// Blue piece.
pub const GLYPH_BLUE: char = 'b';

/// Empty square.
pub const GLYPH_EMPTY: char = '-';

/// Blocked square.
pub const GLYPH_BLOCKED: char = 'X';
