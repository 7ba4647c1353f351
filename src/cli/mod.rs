//! Command-line front end for the `noughts` binary
//!
//! `search` runs a single search from a position and reports the root
//! statistics; `play` pits the search agent against a baseline opponent.

pub mod commands;
pub mod output;
