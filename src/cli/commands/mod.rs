//! Subcommand implementations

pub mod play;
pub mod search;

use anyhow::{Result, anyhow};

use crate::tictactoe::Player;

/// Parse an `x`/`o` command-line token.
pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
