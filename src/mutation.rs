//! Move execution and exact reversal.
//!
//! Every applied move pushes an [`UndoRecord`] holding the squares that
//! changed color by capture and, for extends, the jump counter the move
//! reset. [`Board::undo`] pops the record and restores the previous position
//! exactly; applies and undos must be paired in LIFO order.
//!
//! [`Board::apply_scoped`] returns a [`MoveGuard`] that undoes its move when
//! dropped, so a search can return early from any branch without leaving
//! the board modified.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::board::{Board, BoardEvent, PieceColor};
use crate::constants::EXTEND_OFFSETS;
use crate::error::{GameError, Result};
use crate::grid::{Square, neighbor};
use crate::movegen::Move;

/// What is needed to take back one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// The move that was applied.
    pub mv: Move,
    /// Squares flipped to the mover's color by capture.
    pub flipped: Vec<Square>,
    /// Jump counter before an extend reset it.
    pub saved_jumps: Option<u32>,
}

impl Board {
    /// Apply `mv`, assuming it is legal.
    ///
    /// Calling this with an illegal move is a programming error; use
    /// [`Board::try_make_move`] for unchecked input.
    pub fn make_move(&mut self, mv: Move) {
        debug_assert!(self.legal_move(mv), "illegal move {mv}");
        let record = self.apply(mv);
        trace!(%mv, flipped = record.flipped.len(), "applied");
        self.history.push(record);
        self.notify(&BoardEvent::Moved(mv));
    }

    /// Apply `mv` if it is legal; otherwise leave the board untouched.
    pub fn try_make_move(&mut self, mv: Move) -> Result<()> {
        if !self.legal_move(mv) {
            return Err(match mv {
                Move::Pass => GameError::IllegalPass,
                Move::Transfer { .. } => GameError::IllegalMove(mv),
            });
        }
        self.make_move(mv);
        Ok(())
    }

    /// Pass the turn, assuming the side to move has no move.
    pub fn pass(&mut self) {
        self.make_move(Move::Pass);
    }

    fn apply(&mut self, mv: Move) -> UndoRecord {
        let mover = self.whose_move;
        let mut record = UndoRecord {
            mv,
            flipped: Vec::new(),
            saved_jumps: None,
        };

        if let Move::Transfer { from, to } = mv {
            self.set(to, mover);
            if mv.is_extend() {
                record.saved_jumps = Some(self.num_jumps);
                self.num_jumps = 0;
            } else {
                self.num_jumps += 1;
                self.set(from, PieceColor::Empty);
            }
            record.flipped = self.capture_around(to, mover);
        }

        self.whose_move = mover.opposite();
        record
    }

    /// Flip every opponent piece adjacent to `sq` to `mover`.
    fn capture_around(&mut self, sq: Square, mover: PieceColor) -> Vec<Square> {
        let victim = mover.opposite();
        let mut flipped = Vec::new();
        for &(dc, dr) in &EXTEND_OFFSETS {
            let n = neighbor(sq, dc, dr);
            if self.cells[n] == victim {
                self.set(n, mover);
                flipped.push(n);
            }
        }
        flipped
    }

    /// Take back the last move. Does nothing if no move has been made.
    pub fn undo(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };

        // A captured square holds the mover's color now; flipping it back
        // restores the opponent's piece.
        for &sq in &record.flipped {
            let restored = self.cells[sq].opposite();
            self.set(sq, restored);
        }

        self.whose_move = self.whose_move.opposite();
        let mover = self.whose_move;

        if let Move::Transfer { from, to } = record.mv {
            self.set(to, PieceColor::Empty);
            match record.saved_jumps {
                Some(jumps) => self.num_jumps = jumps,
                None => {
                    self.set(from, mover);
                    self.num_jumps -= 1;
                }
            }
        }

        trace!(mv = %record.mv, "undone");
        self.notify(&BoardEvent::Undone(record.mv));
    }

    /// Apply `mv` and return a guard that undoes it when dropped.
    pub fn apply_scoped(&mut self, mv: Move) -> MoveGuard<'_> {
        self.make_move(mv);
        MoveGuard { board: self }
    }
}

/// A board with one move applied; the move is undone when the guard drops.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.undo();
    }
}
