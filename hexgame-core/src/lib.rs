//! HEXGAME Core - Hex engine and AI
//!
//! This crate provides the core game logic for Hex on an N×N rhombus:
//! - Board storage, move validation and scoped placement
//! - Win detection (from-scratch DFS and incremental union-find)
//! - Stone-count evaluation
//! - Fixed-depth alpha-beta search for the computer player
//! - A game driver and JSON position files for front ends

pub mod board;
pub mod oracle;
pub mod connectivity;
pub mod eval;
pub mod ai;
pub mod random;
pub mod game;
pub mod position;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Move, Placement, Player, DIRECTIONS};
pub use oracle::{check_winner, has_connection};
pub use connectivity::ConnectivityTracker;
pub use eval::{evaluate, DRAW_SCORE, WIN_SCORE};
pub use ai::{
    find_best_move, minimax, minimax_exhaustive, AlphaBetaAI, SearchConfig, SearchResult,
    SearchStats, DEFAULT_DEPTH,
};
pub use random::RandomAI;
pub use game::{Game, GameResult};
pub use position::Position;
pub use error::{HexError, MoveError};
