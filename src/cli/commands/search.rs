//! Search command - run one tree search from a position and report the root

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_player_token;
use crate::{
    cli::output::{format_number, print_board, print_child_table, print_kv, print_section, print_subsection},
    mcts::{Mcts, SearchConfig},
    ports::{Outcome, Position},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Search a position and print the move statistics")]
pub struct SearchArgs {
    /// Board as 9 cells read row by row (`X`, `O`, `.`), e.g. `XO..X....`
    #[arg(long, short = 'b')]
    pub board: Option<String>,

    /// Which token opened the game (`x` or `o`); decides the side to move
    /// when both marks have been placed equally often
    #[arg(long, default_value = "x")]
    pub first: String,

    /// Number of search iterations
    #[arg(long = "iterations", short = 'n')]
    pub iterations: Option<usize>,

    /// Rollouts per simulated node (defaults to the iteration count)
    #[arg(long)]
    pub rollouts: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Load search settings from a JSON file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let board = parse_board(args.board.as_deref(), &args.first)?;
    let config = build_config(&args)?;

    print_section("Monte-Carlo Tree Search");
    print_kv("To move", &board.to_move.to_string());
    print_kv("Iterations", &format_number(config.iterations));
    print_kv("Rollouts per node", &format_number(config.rollouts()));
    print_kv("Exploration", &format!("{:.4}", config.exploration));
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    print_subsection("Position");
    print_board(&board);

    let mut search = Mcts::new(board, config).context("failed to start search")?;
    let stats = search.search();

    print_subsection("Search");
    print_kv("Nodes", &format_number(search.tree().len()));
    print_kv("Rollouts", &format_number(stats.rollouts));
    print_kv("Forced losses", &format_number(stats.forced_losses));
    print_kv("Stalled", &format_number(stats.stalled));

    let best = search.best_move().ok();
    print_subsection("Root children");
    print_child_table(&search.child_summaries(), best);

    let Some(best) = best else {
        println!("\nNo move to play: the position is already decided.");
        print_status(&board);
        return Ok(());
    };

    let after = board.apply_move(best);
    print_subsection("Best move");
    print_kv("Cell", &best.to_string());
    print_board(&after);
    print_status(&after);
    Ok(())
}

fn parse_board(raw: Option<&str>, first: &str) -> Result<BoardState> {
    let first = parse_player_token(first, "--first")?;
    let Some(raw) = raw else {
        return Ok(BoardState::new_with_player(first));
    };

    let board = BoardState::from_string(raw, None)
        .with_context(|| format!("invalid board '{raw}'"))?;
    // Equal piece counts: the opener moves next
    if board.occupied_count().is_multiple_of(2) {
        return Ok(BoardState::from_string(raw, Some(first))?);
    }
    Ok(board)
}

fn build_config(args: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(rollouts) = args.rollouts {
        config.rollouts_per_leaf = Some(rollouts);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn print_status(board: &BoardState) {
    let status = match board.terminal_check() {
        (true, Some(Outcome::Win(player))) => format!("{player} wins"),
        (true, _) => "draw".to_string(),
        (false, _) => format!("ongoing, {} to move", board.to_move),
    };
    print_kv("Status", &status);
}
