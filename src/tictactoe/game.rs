//! A played game: starting position, move history and final outcome

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};
use crate::ports::{Outcome, Position, Status};

/// Outcome of a Tic-Tac-Toe game
pub type GameOutcome = Outcome<Player>;

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
    current: BoardState,
}

impl Game {
    /// Start a game from the empty board with X to move
    pub fn new() -> Self {
        Self::from_position(BoardState::new())
    }

    /// Start a game from an arbitrary position
    pub fn from_position(initial: BoardState) -> Self {
        let outcome = match initial.status() {
            Status::Finished(outcome) => Some(outcome),
            Status::Ongoing => None,
        };
        Game {
            initial,
            moves: Vec::new(),
            outcome,
            current: initial,
        }
    }

    /// Play a move for the side to move
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let next = self.current.make_move(position)?;
        self.moves.push(Move {
            position,
            player: self.current.to_move,
        });
        self.current = next;

        if let Status::Finished(outcome) = next.status() {
            self.outcome = Some(outcome);
        }
        Ok(())
    }

    /// Board after the last recorded move
    pub fn current_state(&self) -> BoardState {
        self.current
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Every board from the initial position through the current one
    pub fn state_sequence(&self) -> Vec<BoardState> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut state = self.initial;
        states.push(state);
        for mv in &self.moves {
            state = state.apply_move(mv.position);
            states.push(state);
        }
        states
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
