//! Match runner: plays repeated games between two agents

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Agent, Outcome, Position},
    tictactoe::{BoardState, Game, Player},
};

/// Play one game from `start`, asking `x` and `o` for moves in turn.
///
/// # Errors
///
/// Propagates agent errors and rejects illegal moves with
/// [`Error::IllegalAgentMove`].
pub fn play_game(start: BoardState, x: &mut dyn Agent, o: &mut dyn Agent) -> Result<Game> {
    let mut game = Game::from_position(start);
    while !game.is_over() {
        let state = game.current_state();
        let agent: &mut dyn Agent = match state.to_move {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };

        let position = agent.select_move(&state)?;
        if !state.legal_moves().contains(&position) {
            return Err(Error::IllegalAgentMove {
                agent: agent.name().to_string(),
                position,
            });
        }
        game.play(position)?;
    }

    if let Some(outcome) = game.outcome {
        x.observe_outcome(outcome, Player::X);
        o.observe_outcome(outcome, Player::O);
    }
    Ok(game)
}

/// Match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: usize,

    /// Random seed; agents are reseeded from it before every game
    pub seed: Option<u64>,

    /// Whether the agent under test plays as X or O
    pub agent_player: Player,

    /// Which player opens every game
    pub first_player: Player,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 20,
            seed: None,
            agent_player: Player::X,
            first_player: Player::X,
        }
    }
}

/// Result of a match, counted from the agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub agent: String,
    pub opponent: String,
    pub agent_player: Player,
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl MatchSummary {
    fn new(agent: &str, opponent: &str, agent_player: Player) -> Self {
        Self {
            agent: agent.to_string(),
            opponent: opponent.to_string(),
            agent_player,
            total_games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            win_rate: 0.0,
            draw_rate: 0.0,
            loss_rate: 0.0,
        }
    }

    fn record(&mut self, outcome: Outcome<Player>) {
        match outcome {
            Outcome::Win(winner) if winner == self.agent_player => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        self.total_games += 1;

        let total = self.total_games as f64;
        self.win_rate = self.wins as f64 / total;
        self.draw_rate = self.draws as f64 / total;
        self.loss_rate = self.losses as f64 / total;
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Plays a fixed number of games between an agent and an opponent
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play the whole match.
    pub fn run(&self, agent: &mut dyn Agent, opponent: &mut dyn Agent) -> Result<MatchSummary> {
        self.run_with(agent, opponent, |_, _| {})
    }

    /// Play the whole match, calling `on_game` after every finished game.
    pub fn run_with<F>(
        &self,
        agent: &mut dyn Agent,
        opponent: &mut dyn Agent,
        mut on_game: F,
    ) -> Result<MatchSummary>
    where
        F: FnMut(usize, &Game),
    {
        let mut summary = MatchSummary::new(agent.name(), opponent.name(), self.config.agent_player);
        let start = BoardState::new_with_player(self.config.first_player);

        for index in 0..self.config.games {
            if let Some(seed) = self.config.seed {
                let base = seed.wrapping_add((index as u64).wrapping_mul(2));
                agent.set_rng_seed(base);
                opponent.set_rng_seed(base.wrapping_add(1));
            }

            let game = match self.config.agent_player {
                Player::X => play_game(start, agent, opponent)?,
                Player::O => play_game(start, opponent, agent)?,
            };
            let Some(outcome) = game.outcome else {
                return Err(Error::NoValidMoves);
            };

            debug!(
                "game {}: {:?} after {} moves",
                index + 1,
                outcome,
                game.moves.len()
            );
            summary.record(outcome);
            on_game(index, &game);
        }

        Ok(summary)
    }
}
