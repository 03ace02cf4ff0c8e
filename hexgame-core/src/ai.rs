//! Fixed-depth minimax with alpha-beta pruning
//!
//! The computer plays `O` and is always the maximizing side. Every node
//! runs the full-board [`check_winner`] scan, which is where nearly all of
//! the time goes.

use rayon::prelude::*;

use crate::board::{Board, Cell, Move, Player};
use crate::eval::{evaluate, DRAW_SCORE, WIN_SCORE};
use crate::oracle::check_winner;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Plies searched below each root candidate
pub const DEFAULT_DEPTH: u32 = 3;

/// The side the search maximizes for
pub const MAXIMIZER: Player = Player::O;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth handed to minimax after the root stone is placed
    pub depth: u32,
    /// Score root candidates on rayon workers, each with its own board copy
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Node counters collected during a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls into the recursive search
    pub nodes: u64,
    /// Sibling scans cut short by `beta <= alpha`
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// Outcome of a root search
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    /// Every root candidate with its score, in row-major order
    pub root_scores: Vec<(Move, i32)>,
    pub stats: SearchStats,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-beta player for `O`
#[derive(Clone, Debug, Default)]
pub struct AlphaBetaAI {
    pub config: SearchConfig,
}

impl AlphaBetaAI {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn with_depth(depth: u32) -> Self {
        Self::new(SearchConfig::default().with_depth(depth))
    }

    /// Best move for `O`, or `None` on a full board
    pub fn best_move(&self, board: &mut Board) -> Option<Move> {
        self.search(board).best_move
    }

    /// Score every empty cell as `O`'s next stone and pick the first
    /// strictly best one in row-major order.
    ///
    /// The board is restored before returning; its turn state is never read
    /// or changed.
    pub fn search(&self, board: &mut Board) -> SearchResult {
        let depth = self.config.depth;
        let candidates: Vec<Move> = board.empty_cells().collect();

        let scored: Vec<(Move, i32, SearchStats)> = if self.config.parallel {
            let snapshot: &Board = board;
            candidates
                .par_iter()
                .map(|&mv| {
                    let mut local = snapshot.clone();
                    let mut stats = SearchStats::default();
                    let score = score_root_move(&mut local, mv, depth, &mut stats);
                    (mv, score, stats)
                })
                .collect()
        } else {
            candidates
                .iter()
                .map(|&mv| {
                    let mut stats = SearchStats::default();
                    let score = score_root_move(board, mv, depth, &mut stats);
                    (mv, score, stats)
                })
                .collect()
        };

        let mut stats = SearchStats::default();
        let mut best: Option<(Move, i32)> = None;
        let mut root_scores = Vec::with_capacity(scored.len());

        for (mv, score, node_stats) in scored {
            tracing::trace!(%mv, score, "root candidate");
            stats.merge(node_stats);
            root_scores.push((mv, score));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        tracing::debug!(
            best = ?best,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            depth,
            "search complete"
        );

        SearchResult {
            best_move: best.map(|(mv, _)| mv),
            score: best.map(|(_, score)| score),
            root_scores,
            stats,
        }
    }
}

/// Best move for `O` at the default depth
pub fn find_best_move(board: &mut Board) -> Option<Move> {
    AlphaBetaAI::default().best_move(board)
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Minimax value of `board` from `O`'s point of view.
///
/// `maximizing` says whether `O` places the next stone.
pub fn minimax(board: &mut Board, depth: u32, maximizing: bool, alpha: i32, beta: i32) -> i32 {
    let mut stats = SearchStats::default();
    alpha_beta(board, depth, maximizing, alpha, beta, &mut stats)
}

/// Unpruned reference search; returns the same value as [`minimax`] with a
/// full window.
pub fn minimax_exhaustive(board: &mut Board, depth: u32, maximizing: bool) -> i32 {
    if let Some(score) = terminal_score(board, depth) {
        return score;
    }

    let (player, mut best) = side(maximizing);
    for mv in board.empty_cells().collect::<Vec<_>>() {
        let mut placed = board.place(mv, player);
        let score = minimax_exhaustive(&mut placed, depth - 1, !maximizing);
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

fn score_root_move(board: &mut Board, mv: Move, depth: u32, stats: &mut SearchStats) -> i32 {
    let mut placed = board.place(mv, MAXIMIZER);
    alpha_beta(&mut placed, depth, false, i32::MIN, i32::MAX, stats)
}

fn alpha_beta(
    board: &mut Board,
    depth: u32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if let Some(score) = terminal_score(board, depth) {
        return score;
    }

    let n = board.size();
    let (player, mut best) = side(maximizing);

    'scan: for x in 0..n {
        for y in 0..n {
            let mv = Move::new(x, y);
            if board.cell(mv) != Cell::Empty {
                continue;
            }

            let score = {
                let mut placed = board.place(mv, player);
                alpha_beta(&mut placed, depth - 1, !maximizing, alpha, beta, stats)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                stats.cutoffs += 1;
                break 'scan;
            }
        }
    }

    best
}

/// Terminal checks in priority order: `O` won, `X` won, board full, depth
/// exhausted.
fn terminal_score(board: &Board, depth: u32) -> Option<i32> {
    match check_winner(board) {
        Some(Player::O) => Some(WIN_SCORE),
        Some(Player::X) => Some(-WIN_SCORE),
        None if board.is_full() => Some(DRAW_SCORE),
        None if depth == 0 => Some(evaluate(board, MAXIMIZER)),
        None => None,
    }
}

fn side(maximizing: bool) -> (Player, i32) {
    if maximizing {
        (Player::O, i32::MIN)
    } else {
        (Player::X, i32::MAX)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn random_board(rng: &mut ChaCha8Rng, size: usize, stones: usize) -> Board {
        let mut board = Board::new(size);
        let mut cells: Vec<Move> = board.empty_cells().collect();
        cells.shuffle(rng);
        for mv in cells.into_iter().take(stones) {
            let cell = if rng.gen::<bool>() { Cell::X } else { Cell::O };
            board.set(mv, cell);
        }
        board
    }

    #[test]
    fn test_won_positions_score_exactly() {
        let o_won = Board::from_rows(&[". O X", "X O .", ". O ."]).unwrap();
        let x_won = Board::from_rows(&["X X X", ". O .", "O . ."]).unwrap();
        for depth in 0..4 {
            for maximizing in [true, false] {
                let mut board = o_won.clone();
                assert_eq!(minimax(&mut board, depth, maximizing, i32::MIN, i32::MAX), WIN_SCORE);
                let mut board = x_won.clone();
                assert_eq!(minimax(&mut board, depth, maximizing, i32::MIN, i32::MAX), -WIN_SCORE);
            }
        }
    }

    #[test]
    fn test_depth_zero_uses_evaluation() {
        let mut board = Board::from_rows(&["O . .", ". O .", "X . ."]).unwrap();
        assert_eq!(minimax(&mut board, 0, false, i32::MIN, i32::MAX), 1);
        assert_eq!(minimax(&mut board, 0, true, i32::MIN, i32::MAX), 1);
    }

    #[test]
    fn test_full_board_without_winner_is_draw() {
        let mut board = Board::new(0);
        assert_eq!(minimax(&mut board, 3, true, i32::MIN, i32::MAX), DRAW_SCORE);
        assert_eq!(find_best_move(&mut board), None);
    }

    #[test]
    fn test_best_move_on_empty_board() {
        let mut board = Board::new(3);
        let mv = find_best_move(&mut board).expect("empty board has moves");
        assert_eq!(board, Board::new(3));

        board.set_current_player(Player::O);
        assert!(board.make_move(mv.x as i64, mv.y as i64));
        assert_eq!(board.count(Player::O), 1);
        assert_eq!(board.count(Player::X), 0);
        assert_eq!(board.cell(mv), Cell::O);
    }

    #[test]
    fn test_takes_immediate_win() {
        // (0,2) loses to X at (1,1); (1,1) completes O's chain down to (2,1)
        let mut board = Board::from_rows(&["O X .", "O . X", "X O O"]).unwrap();
        let result = AlphaBetaAI::default().search(&mut board);
        assert_eq!(result.best_move, Some(Move::new(1, 1)));
        assert_eq!(result.score, Some(WIN_SCORE));
        assert_eq!(result.root_scores[0], (Move::new(0, 2), -WIN_SCORE));
    }

    #[test]
    fn test_first_of_equal_moves_wins() {
        // Every reply is scored identically at depth 0
        let mut board = Board::new(3);
        let ai = AlphaBetaAI::with_depth(0);
        let result = ai.search(&mut board);
        assert!(result.root_scores.iter().all(|&(_, s)| s == 1));
        assert_eq!(result.best_move, Some(Move::new(0, 0)));
    }

    #[test]
    fn test_search_restores_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut board = random_board(&mut rng, 4, 7);
        let before = board.clone();
        let _ = AlphaBetaAI::with_depth(2).search(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_pruning_matches_exhaustive() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for round in 0..30 {
            let size = 3 + round % 2;
            let stones = rng.gen_range(0..=size * size - 4);
            let mut board = random_board(&mut rng, size, stones);
            let depth = 1 + (round % 3) as u32;

            for maximizing in [true, false] {
                let pruned = minimax(&mut board, depth, maximizing, i32::MIN, i32::MAX);
                let full = minimax_exhaustive(&mut board, depth, maximizing);
                assert_eq!(pruned, full, "depth {depth} maximizing {maximizing} on {board:?}");
            }

            let result = AlphaBetaAI::with_depth(depth).search(&mut board);
            for (mv, score) in result.root_scores {
                let mut placed = board.place(mv, Player::O);
                assert_eq!(score, minimax_exhaustive(&mut placed, depth, false));
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..5 {
            let mut board = random_board(&mut rng, 4, 6);
            let seq = AlphaBetaAI::new(SearchConfig::default().with_depth(2)).search(&mut board);
            let par = AlphaBetaAI::new(SearchConfig::default().with_depth(2).with_parallel(true))
                .search(&mut board);
            assert_eq!(seq.best_move, par.best_move);
            assert_eq!(seq.score, par.score);
            assert_eq!(seq.root_scores, par.root_scores);
            assert_eq!(seq.stats, par.stats);
        }
    }

    #[test]
    fn test_stats_count_nodes() {
        let mut board = Board::new(3);
        let result = AlphaBetaAI::with_depth(2).search(&mut board);
        assert!(result.stats.nodes >= 9);
        assert!(result.stats.cutoffs > 0);
    }

    #[test]
    fn test_config_builders() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert!(!config.parallel);

        let config = config.with_depth(5).with_parallel(true);
        assert_eq!(config.depth, 5);
        assert!(config.parallel);
    }
}
