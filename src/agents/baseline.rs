//! Baseline agents used as sparring partners for the search

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Result,
    ports::{Agent, Position},
    tictactoe::BoardState,
};

/// Random policy agent
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }
        Ok(moves[self.rng.random_range(0..moves.len())])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Defensive policy agent
///
/// Takes an immediate win when one exists, blocks the opponent's immediate
/// win next, and otherwise plays randomly.
pub struct DefensiveAgent {
    name: String,
    rng: StdRng,
}

impl DefensiveAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a defensive agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for DefensiveAgent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        if state.has_immediate_win()
            && let Some(&win) = state.winning_moves_for(state.to_move).first()
        {
            return Ok(win);
        }
        if let Some(&block) = state.winning_moves_for(state.to_move.opponent()).first() {
            return Ok(block);
        }
        Ok(moves[self.rng.random_range(0..moves.len())])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
