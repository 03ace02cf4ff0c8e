//! Uniform-random opponent

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Move};

/// Picks uniformly among the empty cells
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `None` on a full board
    pub fn pick_move(&mut self, board: &Board) -> Option<Move> {
        let moves: Vec<Move> = board.empty_cells().collect();
        moves.choose(&mut self.rng).copied()
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}
