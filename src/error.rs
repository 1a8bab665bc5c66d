//! Errors reported to the command layer.
//!
//! A rejected operation never mutates the board.

use thiserror::Error;

use crate::movegen::Move;

/// Errors produced by checked board operations and command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("illegal pass: a move is available")]
    IllegalPass,

    #[error("illegal block placement at {0}")]
    IllegalBlock(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("'{command}' is not allowed while {state}")]
    NotAllowed {
        command: &'static str,
        state: &'static str,
    },

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

/// Result alias for operations that can fail with a [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;
