//! Integration tests for ataxx-rust
//!
//! These exercise the board, the mutation engine and the search together
//! through the public API: reversibility of apply/undo, count bookkeeping,
//! legality boundaries, captures, game-over rules and search legality.

use ataxx_rust::board::{Board, PieceColor};
use ataxx_rust::constants::{JUMP_LIMIT, REAL_SQUARES, SIDE};
use ataxx_rust::grid::{Square, index, parse_square};
use ataxx_rust::movegen::{Move, legal_moves};
use ataxx_rust::search::{SearchConfig, SearchEngine};

// =============================================================================
// Helper functions
// =============================================================================

fn sq(name: &str) -> Square {
    parse_square(name).unwrap_or_else(|| panic!("bad square {name}"))
}

fn mv(text: &str) -> Move {
    text.parse().unwrap_or_else(|e| panic!("bad move {text}: {e}"))
}

/// Apply a list of moves in order, panicking on the first illegal one.
fn make_moves(board: &mut Board, moves: &[&str]) {
    for text in moves {
        let m = mv(text);
        assert!(board.legal_move(m), "illegal move {text}\n{board:?}");
        board.make_move(m);
    }
}

fn assert_counts_consistent(board: &Board) {
    let total = board.red_pieces() + board.blue_pieces() + board.num_empty() + board.num_blocks();
    assert_eq!(total, REAL_SQUARES, "counts drifted\n{board:?}");

    let mut scanned = [0usize; 4];
    for row in 0..SIDE {
        for col in 0..SIDE {
            scanned[board.get(index(col, row)) as usize] += 1;
        }
    }
    assert_eq!(scanned[PieceColor::Red as usize], board.red_pieces());
    assert_eq!(scanned[PieceColor::Blue as usize], board.blue_pieces());
    assert_eq!(scanned[PieceColor::Empty as usize], board.num_empty());
    assert_eq!(scanned[PieceColor::Blocked as usize], board.num_blocks());
}

/// Play `steps` random legal moves (passes included) and return them.
fn random_playout(board: &mut Board, rng: &mut fastrand::Rng, steps: usize) -> Vec<Move> {
    let mut played = Vec::new();
    for _ in 0..steps {
        if board.game_over() {
            break;
        }
        let moves = legal_moves(board);
        let m = moves[rng.usize(..moves.len())];
        board.make_move(m);
        assert_counts_consistent(board);
        played.push(m);
    }
    played
}

const GAME1: &[&str] = &["a1-b1", "a7-a6", "b1-b2", "a6-a5", "b2-b3", "a5-a4"];

// =============================================================================
// Reversibility
// =============================================================================

#[test]
fn test_undo_returns_to_start() {
    let mut b0 = Board::new();
    let b1 = b0.clone();
    make_moves(&mut b0, GAME1);
    let b2 = b0.clone();
    for _ in 0..GAME1.len() {
        b0.undo();
    }
    assert_eq!(b0, b1, "failed to return to start");
    make_moves(&mut b0, GAME1);
    assert_eq!(b0, b2, "second pass failed to reach same position");
}

#[test]
fn test_random_playouts_undo_and_replay() {
    for seed in 0..20 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut board = Board::new();
        if seed % 2 == 0 {
            board.set_block(sq("c3")).unwrap();
            board.set_block(sq("d2")).unwrap();
        }
        let start = board.clone();

        let played = random_playout(&mut board, &mut rng, 120);
        let end = board.clone();

        for _ in 0..played.len() {
            board.undo();
            assert_counts_consistent(&board);
        }
        assert_eq!(board, start, "seed {seed}: undo did not restore the start");
        assert_eq!(board.num_jumps(), 0);

        for &m in &played {
            board.make_move(m);
        }
        assert_eq!(board, end, "seed {seed}: replay diverged");
    }
}

// =============================================================================
// Legality
// =============================================================================

#[test]
fn test_legality_boundary() {
    let mut b = Board::new();
    b.set(sq("d4"), PieceColor::Red);
    let from = sq("d4");
    for row in 0..SIDE {
        for col in 0..SIDE {
            let to = index(col, row);
            let dist = (col as isize - 3).abs().max((row as isize - 3).abs());
            let m = Move::new(from, to);
            let expected = b.get(to) == PieceColor::Empty && (dist == 1 || dist == 2);
            assert_eq!(b.legal_move(m), expected, "{m} at distance {dist}");
            if expected {
                assert_eq!(m.is_extend(), dist == 1);
                assert_eq!(m.is_jump(), dist == 2);
            }
        }
    }
}

#[test]
fn test_occupied_destination_always_illegal() {
    let mut b = Board::new();
    b.set(sq("b2"), PieceColor::Red);
    b.set(sq("c3"), PieceColor::Blue);
    b.set_block(sq("b3")).unwrap();
    for to in ["b2", "c3", "b3", "a7", "g7"] {
        assert!(!b.legal_move(Move::new(sq("a1"), sq(to))), "a1-{to}");
    }
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_flips_exactly_adjacent_opponents() {
    let mut b = Board::new();
    // Five Blue pieces around e5 (distance 1), two farther away.
    for name in ["d4", "e4", "f6", "d6", "f5"] {
        b.set(sq(name), PieceColor::Blue);
    }
    for name in ["c3", "g3"] {
        b.set(sq(name), PieceColor::Blue);
    }
    b.set(sq("e6"), PieceColor::Red);
    b.set_block(sq("d5")).unwrap();

    let red_before = b.red_pieces();
    let blue_before = b.blue_pieces();
    b.make_move(mv("e6-e5"));

    let k = 5;
    assert_eq!(b.red_pieces(), red_before + 1 + k);
    assert_eq!(b.blue_pieces(), blue_before - k);
    for name in ["d4", "e4", "f6", "d6", "f5"] {
        assert_eq!(b.get(sq(name)), PieceColor::Red, "{name} not captured");
    }
    for name in ["c3", "g3"] {
        assert_eq!(b.get(sq(name)), PieceColor::Blue, "{name} wrongly captured");
    }
    assert_eq!(b.get(sq("d5")), PieceColor::Blocked);
    assert_counts_consistent(&b);
}

#[test]
fn test_jump_captures_and_undo() {
    let mut b = Board::new();
    b.set(sq("c2"), PieceColor::Blue);
    let before = b.clone();
    b.make_move(mv("a1-c3"));
    assert_eq!(b.get(sq("a1")), PieceColor::Empty);
    assert_eq!(b.get(sq("c2")), PieceColor::Red);
    assert_eq!(b.red_pieces(), 3);
    assert_eq!(b.blue_pieces(), 2);
    assert_eq!(b.num_jumps(), 1);
    b.undo();
    assert_eq!(b, before);
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[test]
fn test_red_extends_from_corner() {
    let mut b = Board::new();
    assert_eq!(b.get(sq("g7")), PieceColor::Red);

    let blue_adjacent = ["e5", "e6", "e7", "f5", "f7", "g5", "g6"]
        .iter()
        .filter(|n| b.get(sq(n)) == PieceColor::Blue)
        .count();

    b.make_move(mv("g7-f6"));
    assert_eq!(b.get(sq("f6")), PieceColor::Red);
    assert_eq!(b.get(sq("g7")), PieceColor::Red);
    assert_eq!(b.red_pieces(), 3 + blue_adjacent);
    assert_eq!(b.blue_pieces(), 2 - blue_adjacent);
    assert_eq!(b.whose_move(), PieceColor::Blue);

    b.undo();
    assert_eq!(b, Board::new());
    assert_eq!(b.red_pieces(), 2);
    assert_eq!(b.blue_pieces(), 2);
}

// =============================================================================
// Game over
// =============================================================================

#[test]
fn test_game_over_when_color_eliminated() {
    let mut b = Board::new();
    b.set(sq("g1"), PieceColor::Empty);
    b.set(sq("b6"), PieceColor::Red);
    assert!(!b.game_over());
    // b7 touches Blue's last piece on a7
    b.make_move(mv("b6-b7"));
    assert_eq!(b.blue_pieces(), 0);
    assert!(b.game_over());
    assert_eq!(b.winner(), Some(PieceColor::Red));
}

#[test]
fn test_game_over_after_jump_streak() {
    let cycle = ["a1-a3", "a7-c7", "a3-a1", "c7-a7"];
    let mut b = Board::new();
    for i in 0..JUMP_LIMIT as usize {
        make_moves(&mut b, &[cycle[i % cycle.len()]]);
    }
    assert_eq!(b.num_jumps(), JUMP_LIMIT);
    assert!(!b.game_over());

    make_moves(&mut b, &[cycle[JUMP_LIMIT as usize % cycle.len()]]);
    assert_eq!(b.num_jumps(), JUMP_LIMIT + 1);
    assert!(b.can_move(PieceColor::Red) && b.can_move(PieceColor::Blue));
    assert!(b.game_over());
    assert_eq!(b.winner(), None);

    b.undo();
    assert!(!b.game_over());
}

#[test]
fn test_game_over_when_nobody_can_move() {
    let mut b = Board::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let s = index(col, row);
            if b.get(s) == PieceColor::Empty {
                b.set(s, if col < 3 { PieceColor::Red } else { PieceColor::Blue });
            }
        }
    }
    assert_eq!(b.num_empty(), 0);
    assert!(!b.can_move(PieceColor::Red));
    assert!(!b.can_move(PieceColor::Blue));
    assert!(b.game_over());
    assert_eq!(b.winner(), Some(PieceColor::Blue));
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_returns_legal_moves_in_random_positions() {
    let config = SearchConfig {
        max_depth: 1,
        endgame_empty: 5,
    };
    for seed in 0..10 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut board = Board::new();
        random_playout(&mut board, &mut rng, 10 + seed as usize * 4);
        if board.game_over() {
            continue;
        }
        let before = board.clone();
        let mut engine = SearchEngine::with_seed(config, seed);
        let m = engine.find_move(&board);
        assert!(board.legal_move(m), "seed {seed}: illegal {m}\n{board:?}");
        assert_eq!(board, before, "seed {seed}: search modified the board");
    }
}

#[test]
fn test_search_passes_when_it_must() {
    let mut b = Board::new();
    for name in ["a2", "b1", "b2", "a3", "b3", "c1", "c2", "c3"] {
        b.set(sq(name), PieceColor::Blocked);
    }
    b.set(sq("g7"), PieceColor::Empty);
    assert!(!b.game_over());
    let mut engine = SearchEngine::with_seed(SearchConfig::default(), 2);
    let m = engine.find_move(&b);
    assert_eq!(m, Move::Pass);
    assert!(b.legal_move(m));
}

#[test]
fn test_engine_game_to_completion() {
    let config = SearchConfig {
        max_depth: 1,
        endgame_empty: 5,
    };
    let mut red = SearchEngine::with_seed(config, 100);
    let mut blue = SearchEngine::with_seed(config, 200);
    let mut board = Board::new();
    let mut plies = 0;
    while !board.game_over() && plies < 400 {
        let engine = match board.whose_move() {
            PieceColor::Red => &mut red,
            _ => &mut blue,
        };
        let m = engine.find_move(&board);
        assert!(board.legal_move(m), "illegal {m}\n{board:?}");
        board.make_move(m);
        assert_counts_consistent(&board);
        plies += 1;
    }
    assert!(board.game_over(), "game did not finish in {plies} plies");

    for _ in 0..plies {
        board.undo();
    }
    assert_eq!(board, Board::new());
}
