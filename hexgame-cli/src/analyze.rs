//! Analyze command - best computer move for a saved position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_position(), analyze_board(), report_analysis()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use hexgame_core::{check_winner, AlphaBetaAI, Board, Move, Player, Position, SearchConfig, SearchStats, DEFAULT_DEPTH};

use crate::display::render_board;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Position JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Search depth below each candidate move
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Score candidate moves on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Search outcome for one position
#[derive(Clone, Debug)]
struct Analysis {
    board: Board,
    winner: Option<Player>,
    best_move: Option<Move>,
    score: Option<i32>,
    root_scores: Vec<(Move, i32)>,
    stats: SearchStats,
    elapsed: Duration,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run analyze command
///
/// 1. Load the position
/// 2. Search it for O
/// 3. Report
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board = load_position(&args.file)?;
    tracing::info!(file = %args.file.display(), size = board.size(), depth = args.depth, "analyzing");

    let config = SearchConfig::default()
        .with_depth(args.depth)
        .with_parallel(args.parallel);
    let analysis = analyze_board(board, &config);

    report_analysis(&analysis, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_position(path: &Path) -> Result<Board> {
    let position = Position::load(path)
        .with_context(|| format!("Failed to load position: {}", path.display()))?;
    position
        .to_board()
        .with_context(|| format!("Malformed position: {}", path.display()))
}

/// Search the board unless it is already decided
fn analyze_board(mut board: Board, config: &SearchConfig) -> Analysis {
    let winner = check_winner(&board);
    let start = Instant::now();

    let (best_move, score, root_scores, stats) = if winner.is_some() {
        (None, None, Vec::new(), SearchStats::default())
    } else {
        let result = AlphaBetaAI::new(config.clone()).search(&mut board);
        (result.best_move, result.score, result.root_scores, result.stats)
    };

    Analysis {
        board,
        winner,
        best_move,
        score,
        root_scores,
        stats,
        elapsed: start.elapsed(),
    }
}

fn report_analysis(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!("{}", json_analysis(analysis)?);
    } else {
        print!("{}", text_analysis(analysis));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn json_analysis(analysis: &Analysis) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonCandidate {
        row: usize,
        col: usize,
        score: i32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        size: usize,
        winner: Option<Player>,
        best_move: Option<[usize; 2]>,
        score: Option<i32>,
        nodes: u64,
        cutoffs: u64,
        elapsed_ms: f64,
        candidates: Vec<JsonCandidate>,
    }

    let output = JsonOutput {
        size: analysis.board.size(),
        winner: analysis.winner,
        best_move: analysis.best_move.map(|mv| [mv.x, mv.y]),
        score: analysis.score,
        nodes: analysis.stats.nodes,
        cutoffs: analysis.stats.cutoffs,
        elapsed_ms: analysis.elapsed.as_secs_f64() * 1000.0,
        candidates: analysis
            .root_scores
            .iter()
            .map(|&(mv, score)| JsonCandidate {
                row: mv.x,
                col: mv.y,
                score,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn text_analysis(analysis: &Analysis) -> String {
    let mut out = render_board(&analysis.board);

    if let Some(winner) = analysis.winner {
        out.push_str(&format!("Already won by Player {winner}\n"));
        return out;
    }

    match (analysis.best_move, analysis.score) {
        (Some(mv), Some(score)) => out.push_str(&format!("Best move: {mv} (score {score})\n")),
        _ => out.push_str("No moves left.\n"),
    }

    if !analysis.root_scores.is_empty() {
        out.push_str("\nCandidates:\n");
        for (mv, score) in &analysis.root_scores {
            out.push_str(&format!("  {mv}: {score}\n"));
        }
    }

    out.push_str(&format!(
        "\nSearched {} nodes ({} cutoffs) in {:.1?}\n",
        analysis.stats.nodes, analysis.stats.cutoffs, analysis.elapsed
    ));
    out
}

// ============================================================================
// TESTS
// ============================================================================
