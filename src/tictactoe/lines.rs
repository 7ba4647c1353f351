//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        Self::completed_line(cells, player).is_some()
    }

    /// First completed line for `player`, if any
    pub fn completed_line(cells: &[Cell; 9], player: Player) -> Option<[usize; 3]> {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Empty cells that would complete a line for `player`, in ascending order
    pub fn winning_moves(cells: &[Cell; 9], player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::open_cell_in_line(cells, player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Whether `player` could complete a line with a single placement
    pub fn has_immediate_win(cells: &[Cell; 9], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::open_cell_in_line(cells, player, line).is_some())
    }

    /// The single empty cell of a line holding two of `player`'s pieces
    fn open_cell_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut owned = 0;
        let mut empty = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty if empty.is_none() => empty = Some(idx),
                Cell::Empty => return None,
                c if c == target => owned += 1,
                _ => return None,
            }
        }

        if owned == 2 { empty } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_from(s: &str) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for (i, c) in s.chars().enumerate() {
            cells[i] = Cell::from_char(c).unwrap();
        }
        cells
    }

    #[test]
    fn test_completed_line_reports_row() {
        let cells = cells_from("OOOXX....");
        assert_eq!(LineAnalyzer::completed_line(&cells, Player::O), Some([0, 1, 2]));
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_completed_line_reports_anti_diagonal() {
        let cells = cells_from("..X.X.XOO");
        assert_eq!(LineAnalyzer::completed_line(&cells, Player::X), Some([2, 4, 6]));
    }

    #[test]
    fn test_winning_moves_are_sorted_and_unique() {
        // XX.
        // X..
        // ...
        let cells = cells_from("XX.X.....");
        assert_eq!(LineAnalyzer::winning_moves(&cells, Player::X), vec![2, 6]);
        assert!(LineAnalyzer::winning_moves(&cells, Player::O).is_empty());
    }

    #[test]
    fn test_blocked_line_is_not_a_threat() {
        let cells = cells_from("XXO......");
        assert!(!LineAnalyzer::has_immediate_win(&cells, Player::X));
    }

    #[test]
    fn test_two_empty_cells_is_not_a_threat() {
        let cells = cells_from("X........");
        assert!(!LineAnalyzer::has_immediate_win(&cells, Player::X));
        assert!(!LineAnalyzer::has_immediate_win(&cells, Player::O));
    }
}
