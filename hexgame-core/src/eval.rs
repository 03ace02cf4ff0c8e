//! Position evaluation

use crate::board::{Board, Player};

/// Score of a position already won by the maximizing player
pub const WIN_SCORE: i32 = 1000;

/// Score of a full board with no winner
pub const DRAW_SCORE: i32 = 0;

/// Stone-count differential from `player`'s perspective.
///
/// Only used when the search is cut off; terminal positions are scored by
/// the search itself.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    board.count(player) as i32 - board.count(player.opponent()) as i32
}
