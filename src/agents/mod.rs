//! Agents that play complete Tic-Tac-Toe games, and a runner that pits them
//! against each other.
//!
//! - [`MctsAgent`]: plays the move chosen by a fresh tree search each turn
//! - [`RandomAgent`]: uniform random baseline
//! - [`DefensiveAgent`]: blocks immediate threats, otherwise random

pub mod arena;
pub mod baseline;
pub mod search;

pub use arena::{MatchConfig, MatchRunner, MatchSummary, play_game};
pub use baseline::{DefensiveAgent, RandomAgent};
pub use search::MctsAgent;

pub use crate::ports::Agent;
