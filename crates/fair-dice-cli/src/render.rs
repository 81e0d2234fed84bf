//! Text rendering of the win-probability table.

use fair_dice_core::{Die, ProbabilityMatrix};
use std::fmt::Write;

const CORNER: &str = "User dice v";

/// Grid with die labels as headers; each cell is the chance the row die
/// beats the column die
pub fn render_table(dice: &[Die], table: &ProbabilityMatrix) -> String {
    let labels: Vec<String> = dice.iter().map(Die::to_string).collect();

    let first_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(CORNER.len()))
        .max()
        .unwrap_or(CORNER.len());
    let widths: Vec<usize> = labels.iter().map(|label| label.len().max(4)).collect();

    let separator = {
        let mut line = format!("+{}", "-".repeat(first_width + 2));
        for width in &widths {
            line.push('+');
            line.push_str(&"-".repeat(width + 2));
        }
        line.push('+');
        line
    };

    let mut out = String::new();
    let _ = writeln!(out, "Win probability for the row die against the column die:");
    let _ = writeln!(out, "{}", separator);

    let _ = write!(out, "| {:<first_width$} ", CORNER);
    for (label, width) in labels.iter().zip(&widths) {
        let _ = write!(out, "| {:^width$} ", label, width = *width);
    }
    let _ = writeln!(out, "|");
    let _ = writeln!(out, "{}", separator);

    for (label, row) in labels.iter().zip(table.rows()) {
        let _ = write!(out, "| {:<first_width$} ", label);
        for (cell, width) in row.iter().zip(&widths) {
            let _ = write!(out, "| {:^width$} ", cell.to_string(), width = *width);
        }
        let _ = writeln!(out, "|");
    }
    let _ = write!(out, "{}", separator);
    out
}
