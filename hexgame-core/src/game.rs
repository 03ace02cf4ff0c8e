//! Game driver: a board plus history and result
//!
//! This is the narrow interface a front end uses. Moves go through
//! validation, the winner is kept current with [`ConnectivityTracker`],
//! and the computer's replies come from [`AlphaBetaAI`].

use serde::{Deserialize, Serialize};

use crate::ai::{AlphaBetaAI, MAXIMIZER};
use crate::board::{Board, Move, Player};
use crate::connectivity::ConnectivityTracker;
use crate::error::MoveError;
use crate::random::RandomAI;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    XWins,
    OWins,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Ongoing => None,
            GameResult::XWins => Some(Player::X),
            GameResult::OWins => Some(Player::O),
        }
    }

    fn from_winner(winner: Option<Player>) -> Self {
        match winner {
            None => GameResult::Ongoing,
            Some(Player::X) => GameResult::XWins,
            Some(Player::O) => GameResult::OWins,
        }
    }
}

/// A game in progress
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    tracker: ConnectivityTracker,
    history: Vec<(Player, Move)>,
    result: GameResult,
}

impl Game {
    /// Empty board, `X` to move
    pub fn new(size: usize) -> Self {
        Self::from_board(Board::new(size))
    }

    /// Continue from an existing position
    pub fn from_board(board: Board) -> Self {
        let mut tracker = ConnectivityTracker::from_board(&board);
        let result = GameResult::from_winner(tracker.winner());
        Self {
            board,
            tracker,
            history: Vec::new(),
            result,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.board.current_player()
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    /// Moves played through this driver, oldest first
    pub fn history(&self) -> &[(Player, Move)] {
        &self.history
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Play `(x, y)` for the player to move
    pub fn play(&mut self, x: i64, y: i64) -> Result<GameResult, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let player = self.board.current_player();
        let mv = self.board.try_move(x, y)?;
        self.record(player, mv);
        Ok(self.result)
    }

    /// Let the search choose and play `O`'s move.
    ///
    /// `Ok(None)` means the board is full.
    pub fn computer_move(&mut self, ai: &AlphaBetaAI) -> Result<Option<Move>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.board.current_player() != MAXIMIZER {
            return Err(MoveError::WrongTurn(self.board.current_player()));
        }

        let chosen = ai.best_move(&mut self.board);
        if let Some(mv) = chosen {
            self.play(mv.x as i64, mv.y as i64)?;
        }
        Ok(chosen)
    }

    /// Play a uniformly random move for the player to move
    pub fn random_move(&mut self, rng: &mut RandomAI) -> Result<Option<Move>, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let chosen = rng.pick_move(&self.board);
        if let Some(mv) = chosen {
            self.play(mv.x as i64, mv.y as i64)?;
        }
        Ok(chosen)
    }

    fn record(&mut self, player: Player, mv: Move) {
        self.tracker.record(mv, player);
        self.history.push((player, mv));
        self.result = GameResult::from_winner(self.tracker.winner());
        debug_assert_eq!(
            self.result.winner(),
            crate::oracle::check_winner(&self.board),
            "tracker disagrees with oracle"
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
