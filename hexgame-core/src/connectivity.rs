//! Incremental win detection with union-find
//!
//! Every cell is a node, plus four virtual nodes: a source and a sink edge
//! for each player. A stone is joined with its same-owner neighbours and
//! with whichever of its owner's edges it touches; a player has won once
//! their source and sink share a root.
//!
//! Stones are only ever added, so this suits the played line of a game.
//! The search engine undoes moves and keeps using [`crate::oracle`].

use crate::board::{Board, Cell, Move, Player};

/// Disjoint-set forest with union by rank and path halving
#[derive(Clone, Debug)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

/// Tracks edge-to-edge connectivity for both players as stones are added
#[derive(Clone, Debug)]
pub struct ConnectivityTracker {
    size: usize,
    owners: Vec<Cell>,
    sets: UnionFind,
}

impl ConnectivityTracker {
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            owners: vec![Cell::Empty; cells],
            sets: UnionFind::new(cells + 4),
        }
    }

    /// Build a tracker reflecting every stone already on `board`
    pub fn from_board(board: &Board) -> Self {
        let mut tracker = Self::new(board.size());
        for x in 0..board.size() {
            for y in 0..board.size() {
                let mv = Move::new(x, y);
                if let Some(owner) = board.cell(mv).owner() {
                    tracker.record(mv, owner);
                }
            }
        }
        tracker
    }

    /// Add `player`'s stone at `mv`. Recording an occupied cell again is a no-op.
    pub fn record(&mut self, mv: Move, player: Player) {
        let n = self.size;
        let idx = mv.x * n + mv.y;
        if self.owners[idx] != Cell::Empty {
            return;
        }
        self.owners[idx] = player.cell();

        let (source, sink) = self.edges(player);
        let (start, end) = match player {
            Player::X => (mv.y == 0, mv.y == n - 1),
            Player::O => (mv.x == 0, mv.x == n - 1),
        };
        if start {
            self.sets.union(idx, source);
        }
        if end {
            self.sets.union(idx, sink);
        }

        for (dx, dy) in crate::board::DIRECTIONS {
            let (nx, ny) = (mv.x as i64 + dx, mv.y as i64 + dy);
            if nx < 0 || ny < 0 || nx >= n as i64 || ny >= n as i64 {
                continue;
            }
            let nidx = nx as usize * n + ny as usize;
            if self.owners[nidx] == player.cell() {
                self.sets.union(idx, nidx);
            }
        }
    }

    pub fn is_connected(&mut self, player: Player) -> bool {
        let (source, sink) = self.edges(player);
        self.sets.connected(source, sink)
    }

    /// Same answer as [`crate::oracle::check_winner`] for the recorded stones
    pub fn winner(&mut self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| self.is_connected(player))
    }

    fn edges(&self, player: Player) -> (usize, usize) {
        let base = self.size * self.size;
        match player {
            Player::X => (base, base + 1),
            Player::O => (base + 2, base + 3),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::check_winner;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_tracker() {
        let mut tracker = ConnectivityTracker::new(4);
        assert_eq!(tracker.winner(), None);
    }

    #[test]
    fn test_single_cell() {
        let mut tracker = ConnectivityTracker::new(1);
        tracker.record(Move::new(0, 0), Player::O);
        assert_eq!(tracker.winner(), Some(Player::O));
    }

    #[test]
    fn test_zigzag_from_board() {
        let board = Board::from_rows(&[". . O X", ". X X O", "X O . .", "O . . ."]).unwrap();
        let mut tracker = ConnectivityTracker::from_board(&board);
        assert_eq!(tracker.winner(), Some(Player::X));
        assert!(!tracker.is_connected(Player::O));
    }

    #[test]
    fn test_agrees_with_oracle_on_random_games() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for game in 0..40 {
            let size = 2 + game % 6;
            let mut board = Board::new(size);
            let mut tracker = ConnectivityTracker::new(size);

            let mut cells: Vec<Move> = board.empty_cells().collect();
            cells.shuffle(&mut rng);
            for mv in cells {
                let player = board.current_player();
                assert!(board.make_move(mv.x as i64, mv.y as i64));
                tracker.record(mv, player);
                assert_eq!(tracker.winner(), check_winner(&board), "board {:?}", board);
            }
        }
    }
}
