//! Move sources for the two sides of a game.
//!
//! An automated player asks the [`SearchEngine`] for its move; a manual
//! player hands out moves that the command layer has offered to it.

use std::collections::VecDeque;

use crate::board::{Board, PieceColor};
use crate::movegen::Move;
use crate::search::SearchEngine;

/// A player driven by the search engine.
pub struct AiPlayer {
    color: PieceColor,
    engine: SearchEngine,
}

impl AiPlayer {
    pub fn new(color: PieceColor, engine: SearchEngine) -> Self {
        Self { color, engine }
    }

    pub fn engine_mut(&mut self) -> &mut SearchEngine {
        &mut self.engine
    }

    fn next_move(&mut self, board: &Board) -> Option<Move> {
        Some(self.engine.find_move(board))
    }
}

/// A player whose moves come from outside (typed commands, scripts).
#[derive(Debug)]
pub struct ManualPlayer {
    color: PieceColor,
    pending: VecDeque<Move>,
}

impl ManualPlayer {
    pub fn new(color: PieceColor) -> Self {
        Self {
            color,
            pending: VecDeque::new(),
        }
    }

    /// Queue a move to be returned by the next request.
    pub fn offer(&mut self, mv: Move) {
        self.pending.push_back(mv);
    }

    /// Drop any queued moves.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    fn next_move(&mut self, _board: &Board) -> Option<Move> {
        self.pending.pop_front()
    }
}

/// One side of the game.
pub enum Player {
    Auto(AiPlayer),
    Manual(ManualPlayer),
}

impl Player {
    pub fn color(&self) -> PieceColor {
        match self {
            Player::Auto(p) => p.color,
            Player::Manual(p) => p.color,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Player::Auto(_))
    }

    /// Produce the next move for this player's color.
    ///
    /// Returns `None` when no move is available: the game is over, it is not
    /// this player's turn, or a manual player has not been given a move yet.
    pub fn next_move(&mut self, board: &Board) -> Option<Move> {
        if board.game_over() || board.whose_move() != self.color() {
            return None;
        }
        match self {
            Player::Auto(p) => p.next_move(board),
            Player::Manual(p) => p.next_move(board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    #[test]
    fn test_manual_returns_offered_moves() {
        let b = Board::new();
        let mut manual = ManualPlayer::new(PieceColor::Red);
        let mv: Move = "a1-b2".parse().unwrap();
        manual.offer(mv);
        let mut player = Player::Manual(manual);
        assert!(!player.is_auto());
        assert_eq!(player.next_move(&b), Some(mv));
        assert_eq!(player.next_move(&b), None);
    }

    #[test]
    fn test_not_your_turn() {
        let b = Board::new();
        let engine = SearchEngine::with_seed(SearchConfig::default(), 1);
        let mut blue = Player::Auto(AiPlayer::new(PieceColor::Blue, engine));
        assert_eq!(blue.color(), PieceColor::Blue);
        assert_eq!(blue.next_move(&b), None);
    }

    #[test]
    fn test_auto_produces_legal_move() {
        let b = Board::new();
        let engine = SearchEngine::with_seed(SearchConfig::default(), 1);
        let mut red = Player::Auto(AiPlayer::new(PieceColor::Red, engine));
        let mv = red.next_move(&b).unwrap();
        assert!(b.legal_move(mv));
    }
}
