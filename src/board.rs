//! Ataxx board representation and read-only queries.
//!
//! The board is an 11x11 array: the real 7x7 board surrounded by two layers
//! of permanently blocked squares. Looking at every square within two rows
//! and columns of a real square therefore never leaves the array, and the
//! normal rule that forbids moving onto a blocked square keeps pieces on the
//! board without any edge tests.
//!
//! Piece counts are maintained incrementally by [`Board::set`], so count
//! queries are O(1). Moves are applied and reverted by the mutation engine
//! (see [`crate::mutation`]).

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use tracing::debug;

use crate::constants::*;
use crate::error::{GameError, Result};
use crate::grid::{
    Square, chebyshev, index, is_corner, is_real, neighbor, parse_square, reflections,
    square_name,
};
use crate::movegen::Move;
use crate::mutation::UndoRecord;

/// Contents of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceColor {
    Empty = 0,
    Blocked = 1,
    Red = 2,
    Blue = 3,
}

impl PieceColor {
    /// The opposing player's color. Empty and blocked squares map to themselves.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::Red => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Red,
            other => other,
        }
    }

    /// True for the two player colors.
    #[inline]
    pub fn is_piece(self) -> bool {
        matches!(self, PieceColor::Red | PieceColor::Blue)
    }

    /// Single-character glyph used by the board dump.
    pub fn glyph(self) -> char {
        match self {
            PieceColor::Red => GLYPH_RED,
            PieceColor::Blue => GLYPH_BLUE,
            PieceColor::Empty => GLYPH_EMPTY,
            PieceColor::Blocked => GLYPH_BLOCKED,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceColor::Red => "Red",
            PieceColor::Blue => "Blue",
            PieceColor::Empty => "Empty",
            PieceColor::Blocked => "Blocked",
        };
        f.write_str(name)
    }
}

impl FromStr for PieceColor {
    type Err = GameError;

    /// Parse a player color token (`red` or `blue`, any case).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(PieceColor::Red),
            "blue" => Ok(PieceColor::Blue),
            _ => Err(GameError::InvalidColor(s.to_string())),
        }
    }
}

/// Notification emitted after every mutating board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// The board was reset to the initial layout.
    Cleared,
    /// A move (or pass) was applied.
    Moved(Move),
    /// The given move was taken back.
    Undone(Move),
    /// A block was placed at the square and its reflections.
    BlockPlaced(Square),
}

/// Callback invoked with every [`BoardEvent`].
pub type Observer = Rc<dyn Fn(&BoardEvent)>;

/// An Ataxx board: grid, side to move, counts, and undo history.
pub struct Board {
    /// Square contents, including the blocked border.
    pub(crate) cells: [PieceColor; BOARDSIZE],
    /// Player on move.
    pub(crate) whose_move: PieceColor,
    /// Consecutive jumps since the last extend.
    pub(crate) num_jumps: u32,
    /// Number of real squares holding each value, indexed by `PieceColor as usize`.
    pub(crate) counts: [usize; 4],
    /// Undo records, most recent last.
    pub(crate) history: Vec<UndoRecord>,
    observers: Vec<Observer>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A new board with the pieces in their initial positions and no blocks.
    pub fn new() -> Self {
        let mut b = Board {
            cells: [PieceColor::Blocked; BOARDSIZE],
            whose_move: PieceColor::Red,
            num_jumps: 0,
            counts: [0; 4],
            history: Vec::new(),
            observers: Vec::new(),
        };
        b.reset();
        b
    }

    /// Reset to the starting state and notify observers.
    pub fn clear(&mut self) {
        self.reset();
        self.notify(&BoardEvent::Cleared);
    }

    fn reset(&mut self) {
        self.cells = [PieceColor::Blocked; BOARDSIZE];
        for row in 0..SIDE {
            for col in 0..SIDE {
                self.cells[index(col, row)] = PieceColor::Empty;
            }
        }
        self.counts = [0; 4];
        self.counts[PieceColor::Empty as usize] = REAL_SQUARES;
        self.whose_move = PieceColor::Red;
        self.num_jumps = 0;
        self.history.clear();

        self.set(index(0, 0), PieceColor::Red);
        self.set(index(SIDE - 1, SIDE - 1), PieceColor::Red);
        self.set(index(0, SIDE - 1), PieceColor::Blue);
        self.set(index(SIDE - 1, 0), PieceColor::Blue);
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register a callback that runs after every mutating operation.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&BoardEvent) + 'static,
    {
        self.observers.push(Rc::new(callback));
    }

    pub(crate) fn notify(&self, event: &BoardEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    // -------------------------------------------------------------------------
    // Square access
    // -------------------------------------------------------------------------

    /// Contents of the square with linearized index `sq`.
    #[inline]
    pub fn get(&self, sq: Square) -> PieceColor {
        self.cells[sq]
    }

    /// Write `value` to the real square `sq`.
    ///
    /// This bypasses the history (the caller records what it needs to undo)
    /// but keeps the piece counts in step with the grid.
    pub fn set(&mut self, sq: Square, value: PieceColor) {
        debug_assert!(is_real(sq), "set on border square {sq}");
        let old = self.cells[sq];
        self.counts[old as usize] -= 1;
        self.counts[value as usize] += 1;
        self.cells[sq] = value;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The player who has the next move. Arbitrary once the game is over.
    #[inline]
    pub fn whose_move(&self) -> PieceColor {
        self.whose_move
    }

    /// Change the side to move without making a move (position setup).
    pub fn set_whose_move(&mut self, color: PieceColor) {
        debug_assert!(color.is_piece());
        self.whose_move = color;
    }

    /// Number of real squares holding `color`.
    #[inline]
    pub fn num_pieces(&self, color: PieceColor) -> usize {
        self.counts[color as usize]
    }

    #[inline]
    pub fn red_pieces(&self) -> usize {
        self.num_pieces(PieceColor::Red)
    }

    #[inline]
    pub fn blue_pieces(&self) -> usize {
        self.num_pieces(PieceColor::Blue)
    }

    #[inline]
    pub fn num_empty(&self) -> usize {
        self.num_pieces(PieceColor::Empty)
    }

    /// Number of blocked squares inside the real board.
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.num_pieces(PieceColor::Blocked)
    }

    /// Consecutive jumps since the last extend (or since the start).
    #[inline]
    pub fn num_jumps(&self) -> u32 {
        self.num_jumps
    }

    /// Number of moves (including passes) that can be undone.
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.history.len()
    }

    /// Moves made since the last clear, oldest first.
    pub fn all_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|r| r.mv)
    }

    /// True iff neither side can move, one side has no pieces, or the jump
    /// streak has exceeded [`JUMP_LIMIT`].
    pub fn game_over(&self) -> bool {
        self.red_pieces() == 0
            || self.blue_pieces() == 0
            || self.num_jumps > JUMP_LIMIT
            || (!self.can_move(PieceColor::Red) && !self.can_move(PieceColor::Blue))
    }

    /// The player with more pieces, or `None` for a tie.
    pub fn winner(&self) -> Option<PieceColor> {
        let (red, blue) = (self.red_pieces(), self.blue_pieces());
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(PieceColor::Red),
            std::cmp::Ordering::Less => Some(PieceColor::Blue),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True iff some piece of `who` has an empty square within distance 2,
    /// ignoring whose move it is and whether the game is over.
    pub fn can_move(&self, who: PieceColor) -> bool {
        if !who.is_piece() {
            return false;
        }
        (BOARD_IMIN..BOARD_IMAX)
            .filter(|&sq| self.cells[sq] == who)
            .any(|sq| self.has_empty_target(sq))
    }

    /// True iff the square `sq` has an empty square within distance 2.
    pub fn has_empty_target(&self, sq: Square) -> bool {
        EXTEND_OFFSETS
            .iter()
            .chain(JUMP_OFFSETS.iter())
            .any(|&(dc, dr)| self.cells[neighbor(sq, dc, dr)] == PieceColor::Empty)
    }

    /// True iff `mv` is legal on the current board.
    ///
    /// A pass is legal only when the side to move has no move. A transfer is
    /// legal when the source holds the mover's piece, the destination is
    /// empty, and the two are one or two squares apart.
    pub fn legal_move(&self, mv: Move) -> bool {
        match mv {
            Move::Pass => !self.can_move(self.whose_move),
            Move::Transfer { from, to } => {
                is_real(from)
                    && is_real(to)
                    && self.cells[from] == self.whose_move
                    && self.cells[to] == PieceColor::Empty
                    && matches!(chebyshev(from, to), 1 | 2)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Blocks
    // -------------------------------------------------------------------------

    /// True iff a block may be placed at `sq`: the square is not a corner and
    /// it and its reflections across the middle row and column are all empty.
    pub fn legal_block(&self, sq: Square) -> bool {
        is_real(sq)
            && !is_corner(sq)
            && reflections(sq)
                .iter()
                .all(|&s| self.cells[s] == PieceColor::Empty)
    }

    /// Place a block at `sq` and its reflections across the middle row and/or
    /// column. The board is left unchanged if the placement is illegal.
    pub fn set_block(&mut self, sq: Square) -> Result<()> {
        if !self.legal_block(sq) {
            let name = if is_real(sq) {
                square_name(sq)
            } else {
                sq.to_string()
            };
            return Err(GameError::IllegalBlock(name));
        }
        for s in reflections(sq) {
            self.set(s, PieceColor::Blocked);
        }
        debug!(square = %square_name(sq), blocks = self.num_blocks(), "placed block");
        self.notify(&BoardEvent::BlockPlaced(sq));
        Ok(())
    }

    /// Place a block at the square named `name` (e.g. `"c3"`).
    pub fn set_block_at(&mut self, name: &str) -> Result<()> {
        let sq = parse_square(name).ok_or_else(|| GameError::InvalidSquare(name.to_string()))?;
        self.set_block(sq)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// A text depiction of the board, row 7 on top. With `legend`, row
    /// numbers and column letters are printed around the edges.
    pub fn render(&self, legend: bool) -> String {
        let mut out = String::from("===\n");
        for row in (0..SIDE).rev() {
            out.push_str("  ");
            if legend {
                out.push_str(&format!("{} ", row + 1));
            }
            let line: Vec<String> = (0..SIDE)
                .map(|col| self.cells[index(col, row)].glyph().to_string())
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        if legend {
            out.push_str("    a b c d e f g\n");
        }
        out.push_str("===");
        out
    }
}

impl Clone for Board {
    /// Copies the position and its history. Observers are not carried over.
    fn clone(&self) -> Self {
        Board {
            cells: self.cells,
            whose_move: self.whose_move,
            num_jumps: self.num_jumps,
            counts: self.counts,
            history: self.history.clone(),
            observers: Vec::new(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.whose_move == other.whose_move
            && self.counts == other.counts
            && self.num_jumps == other.num_jumps
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("whose_move", &self.whose_move)
            .field("red", &self.red_pieces())
            .field("blue", &self.blue_pieces())
            .field("num_jumps", &self.num_jumps)
            .field("moves", &self.history.len())
            .finish()?;
        write!(f, "\n{}", self.render(true))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
