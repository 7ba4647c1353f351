//! Monte-Carlo Tree Search
//!
//! The engine is generic over any [`Position`](crate::ports::Position):
//! - [`node`]: a single tree node and its visit/value statistics
//! - [`tree`]: the node arena with selection, expansion and backpropagation
//! - [`rollout`]: random playouts and their tagged outcomes
//! - [`engine`]: the iteration driver and best-move query
//! - [`config`]: search parameters

pub mod config;
pub mod engine;
pub mod node;
pub mod rollout;
pub mod tree;

pub use config::SearchConfig;
pub use engine::{ChildSummary, IterationReport, Mcts, SearchStats};
pub use node::{NodeId, SearchNode};
pub use rollout::{Rollout, RolloutOutcome};
pub use tree::SearchTree;
