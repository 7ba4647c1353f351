//! Output formatting and progress bars for CLI

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{mcts::ChildSummary, tictactoe::BoardState};

/// Create a progress bar for a match
pub fn create_match_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a board indented under the current section
pub fn print_board(board: &BoardState) {
    for line in board.to_string().lines() {
        println!("  {line}");
    }
}

/// Print one row per root child, marking the chosen move
pub fn print_child_table(children: &[ChildSummary<usize>], best: Option<usize>) {
    println!("  {:>4} {:>8} {:>12} {:>10}", "cell", "visits", "value", "mean");
    for child in children {
        let mean = child
            .mean
            .map_or_else(|| "-".to_string(), |mean| format!("{mean:.4}"));
        let marker = if Some(child.action) == best { " *" } else { "" };
        println!(
            "  {:>4} {:>8} {:>12.3} {:>10}{marker}",
            child.action,
            format_number(child.visits as usize),
            child.value,
            mean
        );
    }
}
