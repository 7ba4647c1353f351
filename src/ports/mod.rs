//! Ports (trait boundaries) between the search core and its collaborators.
//!
//! The search engine only ever talks to a game through [`Position`], and the
//! match runner only ever talks to players through [`Agent`]. Concrete games
//! and players live outside this module.

pub mod agent;
pub mod position;

pub use agent::Agent;
pub use position::{Outcome, Position, Status};
