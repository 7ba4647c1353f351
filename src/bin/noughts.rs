//! noughts - Monte-Carlo Tree Search on Tic-Tac-Toe
//!
//! - `search`: run one search from a position and show the root statistics
//! - `play`: play full games between the search agent and an opponent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Monte-Carlo Tree Search for Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Log per-iteration search details (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a position and print the move statistics
    Search(noughts_mcts::cli::commands::search::SearchArgs),

    /// Play full games against a baseline opponent
    Play(noughts_mcts::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Search(args) => noughts_mcts::cli::commands::search::execute(args),
        Commands::Play(args) => noughts_mcts::cli::commands::play::execute(args),
    }
}
