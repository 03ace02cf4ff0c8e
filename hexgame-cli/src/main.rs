//! HEXGAME CLI - Command-line interface
//!
//! Commands:
//! - play: human (X) against the computer (O)
//! - analyze: best computer move for a saved position
//! - bench: computer against a seeded random player

mod analyze;
mod bench;
mod display;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexgame")]
#[command(about = "Hex against an alpha-beta computer opponent")]
struct Cli {
    /// Seed for the random opponent (bench)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play(play::PlayArgs),
    /// Find the computer's best move in a position file
    Analyze(analyze::AnalyzeArgs),
    /// Pit the computer against a random player
    Bench(bench::BenchArgs),
}

fn main() -> anyhow::Result<()> {
    // Quiet by default so prompts stay readable; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Analyze(args) => analyze::run(args),
        Commands::Bench(args) => bench::run(args, cli.seed),
    }
}
