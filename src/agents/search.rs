//! Tree-search agent

use log::debug;
use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Result,
    mcts::{Mcts, SearchConfig},
    ports::{Agent, Position},
    tictactoe::BoardState,
};

/// Agent that runs a fresh [`Mcts`] search from every position it is asked
/// about. Each search is seeded from the agent's own RNG so a seeded agent
/// plays a reproducible game.
pub struct MctsAgent {
    name: String,
    config: SearchConfig,
    rng: StdRng,
}

impl MctsAgent {
    /// Create an agent searching with `config`. A seed in `config` seeds the
    /// agent; without one the agent is seeded from entropy.
    pub fn new(name: impl Into<String>, config: SearchConfig) -> Self {
        let seed = config.seed.unwrap_or_else(random);
        Self {
            name: name.into(),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.legal_moves();
        match moves.as_slice() {
            [] => return Err(crate::Error::NoValidMoves),
            [only] => return Ok(*only),
            _ => {}
        }

        let config = self.config.clone().with_seed(self.rng.random());
        let mut search = Mcts::new(*state, config)?;
        let stats = search.search();
        let best = search.best_move()?;
        debug!(
            "{} picked {} on {} after {} rollouts",
            self.name,
            best,
            state.encode(),
            stats.rollouts
        );
        Ok(best)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
