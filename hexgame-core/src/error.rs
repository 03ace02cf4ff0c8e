//! Error types

use thiserror::Error;

use crate::board::Player;

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: i64, y: i64, size: usize },

    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },

    #[error("game is already over")]
    GameOver,

    #[error("it is {0}'s turn, not the computer's")]
    WrongTurn(Player),
}

/// Errors from board construction and position files
#[derive(Debug, Error)]
pub enum HexError {
    #[error("board size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown mark '{0}' (expected '.', 'X' or 'O')")]
    UnknownMark(char),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid position JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HexError>;
