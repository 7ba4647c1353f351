//! Position port - the game contract consumed by the search engine

use std::{fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};

/// Final result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome<P> {
    Win(P),
    Draw,
}

impl<P: PartialEq> Outcome<P> {
    /// The winning player, if any
    pub fn winner(&self) -> Option<&P> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }

    /// Whether `player` won this game
    pub fn is_win_for(&self, player: &P) -> bool {
        self.winner() == Some(player)
    }
}

/// Terminal status of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status<P> {
    Ongoing,
    Finished(Outcome<P>),
}

impl<P> Status<P> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Finished(_))
    }

    /// Convert to the `(finished, outcome)` pair form
    pub fn into_pair(self) -> (bool, Option<Outcome<P>>) {
        match self {
            Status::Ongoing => (false, None),
            Status::Finished(outcome) => (true, Some(outcome)),
        }
    }
}

/// A finite, deterministic, perfect-information two-player game position.
///
/// Positions are values: [`Position::apply_move`] returns a new position and
/// never touches the receiver, so a node in the search tree can hand its state
/// to a child without sharing anything mutable.
///
/// # Full expansion
///
/// The engine treats a node as fully expanded once it has one child per legal
/// move. That proxy is only sound for games where the number of legal moves is
/// a function of board occupancy alone (placement games such as Tic-Tac-Toe or
/// Gomoku), not of whose turn it is.
pub trait Position: Clone + Debug {
    /// A move. `Ord` gives the tree a deterministic child order.
    type Action: Copy + Eq + Ord + Hash + Debug;

    /// A side of the board.
    type Player: Copy + Eq + Hash + Debug;

    /// Whether the game is over and, if so, how it ended.
    ///
    /// Must be a pure function of the position.
    fn status(&self) -> Status<Self::Player>;

    /// Every move available to the side to move. Empty when the game is over.
    fn legal_moves(&self) -> Vec<Self::Action>;

    /// Play `action` for the side to move and hand the turn over.
    ///
    /// # Panics
    ///
    /// Implementations panic when `action` is not legal; callers only pass
    /// actions taken from [`Position::legal_moves`].
    #[must_use = "apply_move returns a new position; the original is unchanged"]
    fn apply_move(&self, action: Self::Action) -> Self;

    /// The side to move.
    fn to_move(&self) -> Self::Player;

    /// The other side.
    fn opponent(player: Self::Player) -> Self::Player;

    /// Hand the turn to the other side without playing a move.
    #[must_use = "pass_turn returns a new position; the original is unchanged"]
    fn pass_turn(&self) -> Self;

    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// The `(finished, outcome)` pair form of [`Position::status`].
    fn terminal_check(&self) -> (bool, Option<Outcome<Self::Player>>) {
        self.status().into_pair()
    }

    /// Same position with `player` to move.
    #[must_use]
    fn with_to_move(&self, player: Self::Player) -> Self {
        if self.to_move() == player {
            self.clone()
        } else {
            self.pass_turn()
        }
    }
}
