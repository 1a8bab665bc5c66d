//! Depth-limited adversarial search for the automated player.
//!
//! The search explores continuations by applying and undoing moves on a
//! single working copy of the board. Each candidate is scored by the
//! mover's piece count after the opponent's best reply; near the horizon
//! (or when few empty squares remain) a one-ply greedy evaluation takes
//! over. Ties are broken uniformly at random using the engine's own
//! seedable generator, so play is varied but reproducible under a fixed seed.

use tracing::{debug, warn};

use crate::board::Board;
use crate::constants::{ENDGAME_EMPTY, MAX_DEPTH};
use crate::movegen::{Move, transfers};

/// Bounds on the cost of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Recursive plies before falling back to the greedy evaluation.
    pub max_depth: u32,
    /// Below this many empty squares only the greedy evaluation is used.
    pub endgame_empty: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            endgame_empty: ENDGAME_EMPTY,
        }
    }
}

/// How the one-ply evaluation scores a position after the mover's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scoring {
    /// Higher mover count is better (used at the root).
    MaximizeOwn,
    /// Lower opponent count is better (used for replies inside the search).
    MinimizeOpponent,
}

/// Move selector for the automated player.
pub struct SearchEngine {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl SearchEngine {
    /// A new engine seeded from system entropy.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// A new engine whose tie-breaks are determined by `seed`.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Reset the tie-break generator to `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Choose a move for the side to move.
    ///
    /// Returns [`Move::Pass`] when the game is over or the side to move has
    /// no legal move; otherwise a legal transfer. `board` is not modified.
    pub fn find_move(&mut self, board: &Board) -> Move {
        if board.game_over() || !board.can_move(board.whose_move()) {
            return Move::Pass;
        }
        let mut work = board.clone();
        let mv = self.find_max(&mut work, self.config.max_depth, true);
        debug_assert!(work == *board, "search left the board modified");
        debug!(color = %board.whose_move(), %mv, depth = self.config.max_depth, "search chose move");
        mv
    }

    /// Choose a move with the one-ply greedy evaluation only.
    pub fn greedy_move(&mut self, board: &Board) -> Move {
        if board.game_over() {
            return Move::Pass;
        }
        let mut work = board.clone();
        self.simple_find_max(&mut work, Scoring::MaximizeOwn)
    }

    /// Best move for the side to move on `board`, searching `depth` plies.
    fn find_max(&mut self, board: &mut Board, depth: u32, root: bool) -> Move {
        let scoring = if root {
            Scoring::MaximizeOwn
        } else {
            Scoring::MinimizeOpponent
        };
        if depth == 0 || board.num_empty() < self.config.endgame_empty {
            return self.simple_find_max(board, scoring);
        }

        let mover = board.whose_move();
        if !board.can_move(mover) {
            return Move::Pass;
        }

        let mut best_score = None;
        let mut choose_from = Vec::new();
        for mv in transfers(board, mover) {
            let mut after = board.apply_scoped(mv);
            if after.game_over() {
                return mv;
            }

            let mut reply = self.find_max(&mut after, depth - 1, false);
            if !after.legal_move(reply) {
                warn!(%reply, "search produced an illegal reply, using greedy reply");
                reply = self.simple_find_max(&mut after, Scoring::MinimizeOpponent);
            }
            let replied = after.apply_scoped(reply);
            let score = replied.num_pieces(mover);
            Self::keep_best(&mut best_score, &mut choose_from, score as i64, mv);
        }

        if choose_from.is_empty() {
            warn!(depth, color = %mover, "no candidate moves found, falling back to greedy");
            return self.simple_find_max(board, scoring);
        }
        self.pick(&choose_from)
    }

    /// One-ply evaluation: the best immediate move by `scoring`.
    ///
    /// A move that ends the game is returned at once. Passes only when the
    /// side to move has no transfer.
    fn simple_find_max(&mut self, board: &mut Board, scoring: Scoring) -> Move {
        let mover = board.whose_move();
        let mut best_score = None;
        let mut choose_from = Vec::new();

        for mv in transfers(board, mover) {
            let after = board.apply_scoped(mv);
            if after.game_over() {
                return mv;
            }
            let score = match scoring {
                Scoring::MaximizeOwn => after.num_pieces(mover) as i64,
                Scoring::MinimizeOpponent => -(after.num_pieces(mover.opposite()) as i64),
            };
            Self::keep_best(&mut best_score, &mut choose_from, score, mv);
        }

        if choose_from.is_empty() {
            return Move::Pass;
        }
        self.pick(&choose_from)
    }

    fn keep_best(best: &mut Option<i64>, choose_from: &mut Vec<Move>, score: i64, mv: Move) {
        match *best {
            Some(b) if score < b => {}
            Some(b) if score == b => choose_from.push(mv),
            _ => {
                *best = Some(score);
                choose_from.clear();
                choose_from.push(mv);
            }
        }
    }

    /// Uniform choice among equally good moves, avoiding a pass when any
    /// other candidate exists.
    fn pick(&mut self, choose_from: &[Move]) -> Move {
        let mut choice = choose_from[self.rng.usize(..choose_from.len())];
        if choice.is_pass() && choose_from.iter().any(|m| !m.is_pass()) {
            while choice.is_pass() {
                choice = choose_from[self.rng.usize(..choose_from.len())];
            }
        }
        choice
    }
}
