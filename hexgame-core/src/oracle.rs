//! Win detection by depth-first search
//!
//! Each call walks the board from scratch. Inside the search this runs at
//! every node and dominates the cost; [`crate::connectivity`] keeps the same
//! answer incrementally along a played game.

use crate::board::{Board, Move, Player};

/// Fixed-size bitset over board cells
pub(crate) struct VisitedSet {
    words: Vec<u64>,
}

impl VisitedSet {
    pub(crate) fn new(cells: usize) -> Self {
        Self {
            words: vec![0; cells.div_ceil(64)],
        }
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        (self.words[idx / 64] >> (idx % 64)) & 1 == 1
    }

    #[inline]
    pub(crate) fn insert(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }
}

/// Returns the player with a chain joining their two edges, if any.
///
/// `X` is checked before `O`.
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_connection(board, player))
}

/// True if `player` has a same-owner chain from their start edge to their
/// target edge.
///
/// `X` runs from column 0 to column N-1, `O` from row 0 to row N-1.
pub fn has_connection(board: &Board, player: Player) -> bool {
    let n = board.size();
    let owned = player.cell();
    let mut visited = VisitedSet::new(n * n);
    let mut stack = Vec::new();

    for i in 0..n {
        let start = start_cell(player, i);
        if board.cell(start) != owned {
            continue;
        }

        stack.clear();
        stack.push(start);
        while let Some(mv) = stack.pop() {
            let idx = mv.x * n + mv.y;
            if visited.contains(idx) {
                continue;
            }
            // Checked before marking so a start cell already on the far edge counts
            if on_target_edge(player, mv, n) {
                return true;
            }
            visited.insert(idx);

            stack.extend(
                board
                    .neighbors(mv)
                    .filter(|&nb| board.cell(nb) == owned && !visited.contains(nb.x * n + nb.y)),
            );
        }
    }

    false
}

fn start_cell(player: Player, i: usize) -> Move {
    match player {
        Player::X => Move::new(i, 0),
        Player::O => Move::new(0, i),
    }
}

#[inline]
fn on_target_edge(player: Player, mv: Move, n: usize) -> bool {
    match player {
        Player::X => mv.y == n - 1,
        Player::O => mv.x == n - 1,
    }
}

// ============================================================================
// TESTS
// ============================================================================
