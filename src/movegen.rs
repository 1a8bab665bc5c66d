//! Moves and move generation.
//!
//! A move is either a pass or a transfer from one real square to another.
//! Transfers to an adjacent square (Chebyshev distance 1) are *extends*,
//! which add a piece; transfers over distance 2 are *jumps*, which relocate
//! the piece.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, PieceColor};
use crate::constants::{BOARD_IMAX, BOARD_IMIN, EXTEND_OFFSETS, JUMP_OFFSETS};
use crate::error::GameError;
use crate::grid::{Square, chebyshev, neighbor, parse_square, square_name};

/// A move on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Pass the turn (only legal when the mover has no other move).
    Pass,
    /// Move or copy a piece from `from` to `to`.
    Transfer { from: Square, to: Square },
}

impl Move {
    /// A transfer from `from` to `to`.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move::Transfer { from, to }
    }

    #[inline]
    pub fn is_pass(self) -> bool {
        matches!(self, Move::Pass)
    }

    /// True for a transfer to an adjacent square.
    #[inline]
    pub fn is_extend(self) -> bool {
        matches!(self, Move::Transfer { from, to } if chebyshev(from, to) == 1)
    }

    /// True for a transfer over distance 2.
    #[inline]
    pub fn is_jump(self) -> bool {
        matches!(self, Move::Transfer { from, to } if chebyshev(from, to) == 2)
    }

    pub fn from(self) -> Option<Square> {
        match self {
            Move::Transfer { from, .. } => Some(from),
            Move::Pass => None,
        }
    }

    pub fn to(self) -> Option<Square> {
        match self {
            Move::Transfer { to, .. } => Some(to),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Pass => f.write_str("-"),
            Move::Transfer { from, to } => {
                write!(f, "{}-{}", square_name(from), square_name(to))
            }
        }
    }
}

impl FromStr for Move {
    type Err = GameError;

    /// Parse `"-"` or `"pass"` as a pass, and `"a1-b2"`, `"a1 b2"` or
    /// `"a1b2"` as a transfer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text == "-" || text.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        let squares: String = text.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
        if squares.len() != 4 || !squares.is_ascii() {
            return Err(GameError::InvalidMove(s.to_string()));
        }
        let from = parse_square(&squares[..2]);
        let to = parse_square(&squares[2..]);
        match (from, to) {
            (Some(from), Some(to)) => Ok(Move::new(from, to)),
            _ => Err(GameError::InvalidMove(s.to_string())),
        }
    }
}

/// Empty squares at distance 1 from `sq` (at most 8).
pub fn extend_targets(board: &Board, sq: Square) -> Vec<Square> {
    empty_at(board, sq, &EXTEND_OFFSETS)
}

/// Empty squares at distance 2 from `sq` (at most 16).
pub fn jump_targets(board: &Board, sq: Square) -> Vec<Square> {
    empty_at(board, sq, &JUMP_OFFSETS)
}

fn empty_at(board: &Board, sq: Square, offsets: &[(isize, isize)]) -> Vec<Square> {
    offsets
        .iter()
        .map(|&(dc, dr)| neighbor(sq, dc, dr))
        .filter(|&n| board.get(n) == PieceColor::Empty)
        .collect()
}

/// All real squares holding `color`, in index order.
pub fn pieces_of_color(board: &Board, color: PieceColor) -> Vec<Square> {
    (BOARD_IMIN..BOARD_IMAX)
        .filter(|&sq| board.get(sq) == color)
        .collect()
}

/// Every transfer available to `color`, ignoring whose turn it is.
///
/// Moves are grouped by source square; each source lists its extends before
/// its jumps.
pub fn transfers(board: &Board, color: PieceColor) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in pieces_of_color(board, color) {
        for to in extend_targets(board, from) {
            moves.push(Move::new(from, to));
        }
        for to in jump_targets(board, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Every legal move for the side to move: its transfers, or a single pass
/// when it has none.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let moves = transfers(board, board.whose_move());
    if moves.is_empty() {
        vec![Move::Pass]
    } else {
        moves
    }
}
