//! Monte-Carlo Tree Search for two-player perfect-information games
//!
//! This crate provides:
//! - A game-agnostic [`Position`](ports::Position) contract
//! - An arena-backed MCTS engine with UCT selection and random rollouts
//! - A Tic-Tac-Toe board implementing the contract
//! - Baseline agents and a match runner for playing full games

pub mod agents;
pub mod cli;
pub mod error;
pub mod mcts;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, Result};
pub use mcts::{Mcts, SearchConfig};
pub use ports::{Outcome, Position, Status};
