//! Integration tests for the Hex engine
//!
//! Exercises the public core API the way a front end does: board moves,
//! win detection, the search engine, and the game driver.

use hexgame_core::{
    check_winner, find_best_move, minimax, minimax_exhaustive, AlphaBetaAI, Board, Cell,
    ConnectivityTracker, Game, GameResult, Move, Player, Position, RandomAI, SearchConfig,
    WIN_SCORE,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Random legal game prefix of `plies` moves that nobody has won yet
fn random_open_position(rng: &mut ChaCha8Rng, size: usize, plies: usize) -> Board {
    loop {
        let mut board = Board::new(size);
        let mut cells: Vec<Move> = board.empty_cells().collect();
        cells.shuffle(rng);
        for mv in cells.into_iter().take(plies) {
            assert!(board.make_move(mv.x as i64, mv.y as i64));
        }
        if check_winner(&board).is_none() {
            return board;
        }
    }
}

// ============================================================================
// BOARD TESTS
// ============================================================================

#[test]
fn test_validity_matches_occupancy() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let board = random_open_position(&mut rng, 5, 8);

    for x in -2..7i64 {
        for y in -2..7i64 {
            let expected = (0..5).contains(&x)
                && (0..5).contains(&y)
                && board.cell(Move::new(x as usize, y as usize)) == Cell::Empty;
            assert_eq!(board.is_valid_move(x, y), expected, "({x}, {y})");
        }
    }
}

#[test]
fn test_move_sequence_alternates() {
    let mut board = Board::new(4);
    let moves = [(0, 0), (1, 1), (2, 2), (3, 3)];
    for (i, &(x, y)) in moves.iter().enumerate() {
        let mover = board.current_player();
        assert_eq!(mover, if i % 2 == 0 { Player::X } else { Player::O });
        assert!(board.make_move(x, y));
        assert_eq!(board.get(x, y), Some(mover.cell()));
    }
}

// ============================================================================
// WIN DETECTION TESTS
// ============================================================================

#[test]
fn test_oracle_symmetry_on_random_games() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..50 {
        let size = rng.gen_range(1..=7);
        let mut board = Board::new(size);
        let mut cells: Vec<Move> = board.empty_cells().collect();
        cells.shuffle(&mut rng);
        for mv in cells {
            board.make_move(mv.x as i64, mv.y as i64);
            let swapped = board.transposed_swapped();
            assert_eq!(check_winner(&swapped), check_winner(&board).map(Player::opponent));
        }
        // A full Hex board always has exactly one winner
        assert!(check_winner(&board).is_some());
    }
}

#[test]
fn test_tracker_from_board_matches_oracle() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..20 {
        let board = random_open_position(&mut rng, 6, 14);
        let mut tracker = ConnectivityTracker::from_board(&board);
        assert_eq!(tracker.winner(), check_winner(&board));
    }
}

// ============================================================================
// SEARCH TESTS
// ============================================================================

#[test]
fn test_best_move_blocks_or_wins() {
    // O to move; X threatens (1,1), which also completes O's column
    let mut board = Board::from_rows(&["O X .", "O . X", "X O O"]).unwrap();
    assert_eq!(find_best_move(&mut board), Some(Move::new(1, 1)));
}

#[test]
fn test_pruned_equals_exhaustive_on_legal_positions() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..10 {
        let mut board = random_open_position(&mut rng, 4, 9);
        for depth in 1..=3 {
            let pruned = minimax(&mut board, depth, true, i32::MIN, i32::MAX);
            let full = minimax_exhaustive(&mut board, depth, true);
            assert_eq!(pruned, full);
        }
    }
}

#[test]
fn test_search_never_exceeds_win_score() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut board = random_open_position(&mut rng, 4, 4);
    let result = AlphaBetaAI::default().search(&mut board);
    assert!(result.root_scores.iter().all(|&(_, s)| s.abs() <= WIN_SCORE));
    assert!(result.best_move.is_some());
}

#[test]
fn test_parallel_search_on_open_board() {
    let mut board = Board::new(4);
    let seq = AlphaBetaAI::new(SearchConfig::default().with_depth(2)).search(&mut board);
    let par = AlphaBetaAI::new(SearchConfig::default().with_depth(2).with_parallel(true))
        .search(&mut board);
    assert_eq!(seq.best_move, par.best_move);
    assert_eq!(seq.root_scores, par.root_scores);
    assert_eq!(board, Board::new(4));
}

// ============================================================================
// GAME DRIVER TESTS
// ============================================================================

#[test]
fn test_computer_against_random_always_finishes() {
    let ai = AlphaBetaAI::default();
    let mut o_wins = 0;

    for seed in 0..5 {
        let mut game = Game::new(3);
        let mut random = RandomAI::with_seed(seed);
        while !game.is_over() {
            let played = match game.current_player() {
                Player::X => game.random_move(&mut random).unwrap(),
                Player::O => game.computer_move(&ai).unwrap(),
            };
            assert!(played.is_some());
        }

        let history = game.history();
        for (i, &(player, _)) in history.iter().enumerate() {
            assert_eq!(player, if i % 2 == 0 { Player::X } else { Player::O });
        }
        assert_eq!(game.result().winner(), check_winner(game.board()));
        if game.result() == GameResult::OWins {
            o_wins += 1;
        }
    }

    println!("Computer won {o_wins}/5 games on 3x3");
}

#[test]
fn test_position_roundtrip_through_game() {
    let mut game = Game::new(3);
    game.play(1, 1).unwrap();
    game.play(0, 2).unwrap();

    let position = Position::from_board(game.board());
    let resumed = Game::from_board(position.to_board().unwrap());
    assert_eq!(resumed.board(), game.board());
    assert_eq!(resumed.current_player(), Player::X);
    assert_eq!(resumed.result(), GameResult::Ongoing);
}

// ============================================================================
// PERFORMANCE
// ============================================================================

#[test]
fn test_search_performance() {
    for size in [3, 4, 5] {
        let mut board = Board::new(size);
        let start = Instant::now();
        let result = AlphaBetaAI::with_depth(2).search(&mut board);
        println!(
            "{size}x{size} depth 2: {:?}, {} nodes -> {:?}",
            start.elapsed(),
            result.stats.nodes,
            result.best_move
        );
        assert!(result.best_move.is_some());
    }
}
