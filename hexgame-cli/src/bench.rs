//! Bench command - computer (O) against a seeded random player (X)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: seeding and formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::Rng;

use hexgame_core::{AlphaBetaAI, Game, GameResult, Player, RandomAI, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board size
    #[arg(long, default_value = "4")]
    pub size: usize,

    /// Search depth below each candidate move
    #[arg(long, default_value = "2")]
    pub depth: u32,

    /// Score candidate moves on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    moves: usize,
    searches: usize,
    search_time: Duration,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct BenchResults {
    games: Vec<GameRecord>,
    x_wins: usize,
    o_wins: usize,
    unfinished: usize,
    avg_moves: f32,
    avg_search_ms: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    if args.size == 0 {
        anyhow::bail!("Board size must be at least 1");
    }

    let base_seed = base_seed(seed);
    tracing::info!(
        games = args.games,
        size = args.size,
        depth = args.depth,
        seed = base_seed,
        "starting bench"
    );

    let results = play_games(&args, base_seed)?;
    report_results(&results, args.json);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(args: &BenchArgs, base_seed: u64) -> Result<BenchResults> {
    let ai = AlphaBetaAI::new(
        SearchConfig::default()
            .with_depth(args.depth)
            .with_parallel(args.parallel),
    );

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        let mut random = RandomAI::with_seed(base_seed.wrapping_add(game_num as u64));
        let record = play_single_game(args.size, &ai, &mut random, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves
        );
        games.push(record);
    }

    Ok(compute_statistics(games))
}

fn report_results(results: &BenchResults, json: bool) {
    if json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Random X opens, computer O replies, until someone connects
fn play_single_game(
    size: usize,
    ai: &AlphaBetaAI,
    random: &mut RandomAI,
    game_number: usize,
) -> Result<GameRecord> {
    let mut game = Game::new(size);
    let mut searches = 0;
    let mut search_time = Duration::ZERO;

    while !game.is_over() {
        let played = match game.current_player() {
            Player::X => game.random_move(random)?,
            Player::O => {
                let start = Instant::now();
                let mv = game.computer_move(ai)?;
                search_time += start.elapsed();
                searches += 1;
                mv
            }
        };
        if played.is_none() {
            break;
        }
    }

    Ok(GameRecord {
        game_number,
        result: game.result(),
        moves: game.history().len(),
        searches,
        search_time,
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> BenchResults {
    let x_wins = games.iter().filter(|g| g.result == GameResult::XWins).count();
    let o_wins = games.iter().filter(|g| g.result == GameResult::OWins).count();
    let unfinished = games.iter().filter(|g| g.result == GameResult::Ongoing).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    let total_searches: usize = games.iter().map(|g| g.searches).sum();
    let total_time: Duration = games.iter().map(|g| g.search_time).sum();
    let avg_search_ms = if total_searches == 0 {
        0.0
    } else {
        total_time.as_secs_f64() * 1000.0 / total_searches as f64
    };

    BenchResults {
        games,
        x_wins,
        o_wins,
        unfinished,
        avg_moves,
        avg_search_ms,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Seed from the command line, or a fresh one
fn base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::thread_rng().gen())
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &BenchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameResult,
        moves: usize,
        search_ms: f64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        unfinished: usize,
        avg_moves: f32,
        avg_search_ms: f64,
        o_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        unfinished: results.unfinished,
        avg_moves: results.avg_moves,
        avg_search_ms: results.avg_search_ms,
        o_win_rate: percent(results.o_wins, total) / 100.0,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                moves: g.moves,
                search_ms: g.search_time.as_secs_f64() * 1000.0,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &BenchResults) {
    let total = results.games.len();

    println!("\n=== Bench Results ===");
    println!("Total games: {}", total);
    println!(
        "O (computer) wins: {} ({:.1}%)",
        results.o_wins,
        percent(results.o_wins, total)
    );
    println!(
        "X (random) wins:   {} ({:.1}%)",
        results.x_wins,
        percent(results.x_wins, total)
    );
    if results.unfinished > 0 {
        println!("Unfinished:        {}", results.unfinished);
    }
    println!("Avg moves:         {:.1}", results.avg_moves);
    println!("Avg search:        {:.2} ms", results.avg_search_ms);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves",
            game.game_number, game.result, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
