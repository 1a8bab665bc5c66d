//! Ataxx-Rust: rules and search engine for the Ataxx board game.
//!
//! Two players, Red and Blue, move pieces on a 7x7 board. A piece may
//! *extend* to an adjacent empty square (adding a piece) or *jump* two
//! squares (relocating). Opponent pieces next to the destination are
//! captured. The game ends when neither side can move, a side has no
//! pieces, or more than 25 consecutive jumps have been made.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, rule limits and search defaults
//! - [`grid`] - Square indices over the padded board
//! - [`board`] - Board state, queries, blocks, rendering and observers
//! - [`movegen`] - Moves and move generation
//! - [`mutation`] - Applying and undoing moves
//! - [`search`] - Depth-limited search for the automated player
//! - [`player`] - Automated and manual players
//! - [`session`] - Text command session
//! - [`error`] - Error type for rejected operations
//!
//! ## Example
//!
//! ```
//! use ataxx_rust::board::Board;
//! use ataxx_rust::search::{SearchConfig, SearchEngine};
//!
//! let mut board = Board::new();
//! board.make_move("g7-f6".parse().unwrap());
//!
//! let mut engine = SearchEngine::with_seed(SearchConfig::default(), 1);
//! let reply = engine.find_move(&board);
//! assert!(board.legal_move(reply));
//! board.make_move(reply);
//!
//! board.undo();
//! board.undo();
//! assert_eq!(board, Board::new());
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod grid;
pub mod movegen;
pub mod mutation;
pub mod player;
pub mod search;
pub mod session;
