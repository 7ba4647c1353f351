//! Board state representation and the `Position` implementation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::ports::{Outcome, Position, Status};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Player::X),
            "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayerString {
                player: other.to_string(),
            }),
        }
    }
}

/// Complete board state including cells and whose turn it is
///
/// `Copy` because it is only 10 bytes; every move produces a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first.
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace, `|` and `/` separators are ignored, so both `"XO......."`
    /// and `"X|O|. / .|.|. / .|.|."` describe the same board. The side to move
    /// is `to_move` when given, otherwise inferred from the piece counts
    /// assuming X opened.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board does not have exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts differ by more than one
    /// - `to_move` contradicts the piece counts
    pub fn from_string(s: &str, to_move: Option<Player>) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        if x_count.abs_diff(o_count) > 1 {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }

        let to_move = match to_move {
            Some(player) => {
                let consistent = match player {
                    Player::X => o_count >= x_count,
                    Player::O => x_count >= o_count,
                };
                if !consistent {
                    return Err(crate::Error::InvalidConfiguration {
                        message: format!(
                            "piece counts (X={x_count}, O={o_count}) are inconsistent with {player} to move in '{s}'"
                        ),
                    });
                }
                player
            }
            None if x_count == o_count => Player::X,
            None if x_count == o_count + 1 => Player::O,
            None => Player::X,
        };

        Ok(BoardState { cells, to_move })
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Make a move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        if pos >= 9 || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let mut next = *self;
        next.cells[pos] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Check if the side to move can complete a line right now
    pub fn has_immediate_win(&self) -> bool {
        LineAnalyzer::has_immediate_win(&self.cells, self.to_move)
    }

    /// Cells where `player` would complete a line
    pub fn winning_moves_for(&self, player: Player) -> Vec<usize> {
        LineAnalyzer::winning_moves(&self.cells, player)
    }

    /// Compact key such as `"XO......._X"`
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl Position for BoardState {
    type Action = usize;
    type Player = Player;

    fn status(&self) -> Status<Player> {
        if let Some(winner) = self.winner() {
            Status::Finished(Outcome::Win(winner))
        } else if self.is_draw() {
            Status::Finished(Outcome::Draw)
        } else {
            Status::Ongoing
        }
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.winner().is_some() {
            return Vec::new();
        }
        self.empty_positions()
    }

    fn apply_move(&self, action: usize) -> Self {
        match self.make_move(action) {
            Ok(next) => next,
            Err(err) => panic!("illegal move {action} on board {}: {err}", self.encode()),
        }
    }

    fn to_move(&self) -> Player {
        self.to_move
    }

    fn opponent(player: Player) -> Player {
        player.opponent()
    }

    fn pass_turn(&self) -> Self {
        BoardState {
            cells: self.cells,
            to_move: self.to_move.opponent(),
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---------")?;
            }
            let marks: Vec<String> = chunk.iter().map(|c| c.to_char().to_string()).collect();
            write!(f, "{}", marks.join(" | "))?;
        }
        Ok(())
    }
}
