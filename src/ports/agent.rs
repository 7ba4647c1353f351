//! Agent port - anything that can pick a move on a Tic-Tac-Toe board

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Agent trait - unified interface for everything that plays a game
///
/// The match runner drives two agents through a game without knowing whether
/// either side is a tree search, a random baseline or something else.
pub trait Agent {
    /// Select a move (0-8) for the side to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid moves are available (terminal state).
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Get the agent's name, used in summaries and logs.
    fn name(&self) -> &str;

    /// Called once a game is over. Stateless agents ignore it.
    fn observe_outcome(&mut self, _outcome: GameOutcome, _role: Player) {}

    /// Reseed the agent's random number generator for reproducible matches.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
