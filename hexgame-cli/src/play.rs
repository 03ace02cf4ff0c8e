//! Play command - interactive human (X) against computer (O)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_session()
//! - Level 3: human_turn(), computer_turn()
//! - Level 4: input parsing

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use hexgame_core::{AlphaBetaAI, Board, Game, GameResult, Player, SearchConfig, DEFAULT_DEPTH};

use crate::display::render_board;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct PlayArgs {
    /// Board size (prompted for when omitted)
    #[arg(long)]
    pub size: Option<usize>,

    /// Search depth below each candidate move
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Score candidate moves on all cores
    #[arg(long)]
    pub parallel: bool,
}

/// What a turn left behind
enum TurnOutcome {
    Continue,
    Finished(Option<Player>),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on the terminal
pub fn run(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let winner = run_session(&mut input, &mut output, &args)?;
    tracing::info!(winner = ?winner, "session ended");
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play one game over the given streams.
///
/// Returns the winner, or `None` if input ran out or the size was rejected.
pub fn run_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    args: &PlayArgs,
) -> Result<Option<Player>> {
    let size = match args.size {
        Some(size) => Some(size),
        None => {
            write!(out, "Enter the board size (e.g., 11): ")?;
            out.flush()?;
            read_line(input)?.and_then(|line| parse_size(&line))
        }
    };
    let board = match size.map(Board::try_new) {
        Some(Ok(board)) => board,
        _ => {
            writeln!(out, "Invalid size. Please enter a positive integer.")?;
            return Ok(None);
        }
    };

    let ai = AlphaBetaAI::new(
        SearchConfig::default()
            .with_depth(args.depth)
            .with_parallel(args.parallel),
    );
    let mut game = Game::from_board(board);
    tracing::info!(size = game.board().size(), depth = args.depth, "starting game");

    writeln!(out, "Welcome to Hex!")?;
    write!(out, "{}", render_board(game.board()))?;

    loop {
        let outcome = match game.current_player() {
            Player::X => human_turn(&mut game, input, out)?,
            Player::O => computer_turn(&mut game, &ai, out)?,
        };
        if let TurnOutcome::Finished(winner) = outcome {
            return Ok(winner);
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn human_turn<R: BufRead, W: Write>(game: &mut Game, input: &mut R, out: &mut W) -> Result<TurnOutcome> {
    writeln!(out, "Player {}'s turn", game.current_player())?;
    write!(out, "Enter your move (row and column): ")?;
    out.flush()?;

    let Some(line) = read_line(input)? else {
        writeln!(out)?;
        return Ok(TurnOutcome::Finished(None));
    };

    let Some((x, y)) = parse_move(&line) else {
        tracing::warn!(input = line.trim(), "unparseable move");
        writeln!(out, "Invalid input. Please enter two integers.")?;
        return Ok(TurnOutcome::Continue);
    };

    match game.play(x, y) {
        Ok(result) => {
            write!(out, "{}", render_board(game.board()))?;
            announce(result, out)
        }
        Err(err) => {
            tracing::warn!(%err, "rejected move");
            writeln!(out, "Invalid move. Try again.")?;
            Ok(TurnOutcome::Continue)
        }
    }
}

fn computer_turn<W: Write>(game: &mut Game, ai: &AlphaBetaAI, out: &mut W) -> Result<TurnOutcome> {
    writeln!(out, "Computer's turn")?;

    match game.computer_move(ai)? {
        Some(mv) => {
            writeln!(out, "Computer chose: {} {}", mv.x, mv.y)?;
            write!(out, "{}", render_board(game.board()))?;
            announce(game.result(), out)
        }
        None => {
            writeln!(out, "No moves left.")?;
            Ok(TurnOutcome::Finished(None))
        }
    }
}

fn announce<W: Write>(result: GameResult, out: &mut W) -> Result<TurnOutcome> {
    match result.winner() {
        Some(winner) => {
            writeln!(out, "Player {winner} wins!")?;
            Ok(TurnOutcome::Finished(Some(winner)))
        }
        None => Ok(TurnOutcome::Continue),
    }
}

// ============================================================================
// LEVEL 4 - INPUT PARSING
// ============================================================================

/// Next line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Exactly two whitespace-separated integers
fn parse_move(line: &str) -> Option<(i64, i64)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

fn parse_size(line: &str) -> Option<usize> {
    line.trim().parse().ok()
}

// ============================================================================
// TESTS
// ============================================================================
