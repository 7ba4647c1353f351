//! Play command - pit the search agent against a baseline opponent

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use super::parse_player_token;
use crate::{
    agents::{Agent, DefensiveAgent, MatchConfig, MatchRunner, MctsAgent, RandomAgent},
    cli::output::{create_match_progress, print_kv, print_section},
    mcts::SearchConfig,
    ports::Outcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play full games between the search agent and an opponent")]
pub struct PlayArgs {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 20)]
    pub games: usize,

    /// Opponent to play against (random, defensive, mcts)
    #[arg(long, short = 'o', default_value = "defensive")]
    pub opponent: String,

    /// Which token the search agent controls (`x` or `o`)
    #[arg(long = "mcts-player", default_value = "x")]
    pub mcts_player: String,

    /// Which token makes the first move in every game (`x` or `o`)
    #[arg(long = "first-player", default_value = "x")]
    pub first_player: String,

    /// Search iterations per move
    #[arg(long = "iterations", short = 'n', default_value_t = 200)]
    pub iterations: usize,

    /// Rollouts per simulated node (defaults to the iteration count)
    #[arg(long)]
    pub rollouts: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Export the match summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let agent_player = parse_player_token(&args.mcts_player, "--mcts-player")?;
    let first_player = parse_player_token(&args.first_player, "--first-player")?;

    let mut search_config = SearchConfig::new(args.iterations);
    if let Some(rollouts) = args.rollouts {
        search_config = search_config.with_rollouts_per_leaf(rollouts);
    }
    if let Some(seed) = args.seed {
        search_config = search_config.with_seed(seed);
    }
    search_config.validate()?;

    let mut agent = MctsAgent::new("MCTS", search_config.clone());
    let mut opponent = create_opponent(&args.opponent, search_config)?;

    let runner = MatchRunner::new(MatchConfig {
        games: args.games,
        seed: args.seed,
        agent_player,
        first_player,
    });

    print_section("Match");
    print_kv("Agent", &format!("{} as {agent_player}", agent.name()));
    print_kv("Opponent", opponent.name());
    print_kv("First player", &first_player.to_string());
    print_kv("Games", &args.games.to_string());
    print_kv("Iterations/move", &args.iterations.to_string());

    let progress = if args.progress {
        Some(create_match_progress(args.games as u64)?)
    } else {
        None
    };
    let (mut wins, mut draws, mut losses) = (0, 0, 0);

    let summary = runner.run_with(&mut agent, opponent.as_mut(), |_, game| {
        match game.outcome {
            Some(Outcome::Win(winner)) if winner == agent_player => wins += 1,
            Some(Outcome::Win(_)) => losses += 1,
            _ => draws += 1,
        }
        if let Some(pb) = &progress {
            pb.set_message(format!("W:{wins} D:{draws} L:{losses}"));
            pb.inc(1);
        }
    })?;

    if let Some(pb) = progress {
        pb.finish_with_message(format!("W:{wins} D:{draws} L:{losses}"));
    }

    println!("\n=== Match Complete ===");
    println!("Total games: {}", summary.total_games);
    println!("Wins: {} ({:.1}%)", summary.wins, summary.win_rate * 100.0);
    println!("Draws: {} ({:.1}%)", summary.draws, summary.draw_rate * 100.0);
    println!(
        "Losses: {} ({:.1}%)",
        summary.losses,
        summary.loss_rate * 100.0
    );

    if let Some(path) = &args.export {
        summary
            .save(path)
            .with_context(|| format!("failed to export summary to {}", path.display()))?;
        println!("\nSummary exported to: {}", path.display());
    }

    Ok(())
}

fn create_opponent(kind: &str, search_config: SearchConfig) -> Result<Box<dyn Agent>> {
    match kind.to_lowercase().as_str() {
        "random" => Ok(Box::new(RandomAgent::new("Random"))),
        "defensive" => Ok(Box::new(DefensiveAgent::new("Defensive"))),
        "mcts" => Ok(Box::new(MctsAgent::new("MCTS-opponent", search_config))),
        other => Err(anyhow!(
            "Unknown opponent type: '{other}'. Supported: random, defensive, mcts"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::MatchSummary;

    fn args() -> PlayArgs {
        PlayArgs {
            games: 2,
            opponent: "random".to_string(),
            mcts_player: "x".to_string(),
            first_player: "x".to_string(),
            iterations: 15,
            rollouts: Some(5),
            seed: Some(4),
            progress: false,
            export: None,
        }
    }

    #[test]
    fn test_unknown_opponent_is_rejected() {
        let err = create_opponent("optimal", SearchConfig::new(5))
            .err()
            .unwrap();
        assert!(err.to_string().contains("optimal"));
    }

    #[test]
    fn test_execute_exports_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        let mut args = args();
        args.export = Some(path.clone());

        execute(args).unwrap();
        let summary = MatchSummary::load(&path).unwrap();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.agent, "MCTS");
        assert_eq!(summary.opponent, "Random");
    }
}
