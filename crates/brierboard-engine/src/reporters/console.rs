//! Console reporter: an aligned table for the terminal.

use brierboard_core::errors::OutputError;

use super::format::{cells, COLUMNS};
use super::Reporter;
use crate::leaderboard::Leaderboard;

/// Columns shown on the terminal, by index into [`COLUMNS`].
const SHOWN: [usize; 9] = [0, 1, 3, 10, 11, 12, 13, 14, 16];

pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn highlight(&self, on: bool) -> (&'static str, &'static str) {
        if self.use_color && on {
            ("\x1b[1m", "\x1b[0m")
        } else {
            ("", "")
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn file_name(&self) -> Option<&'static str> {
        None
    }

    fn generate(&self, leaderboard: &Leaderboard) -> Result<String, OutputError> {
        let header: Vec<String> = SHOWN.iter().map(|&c| COLUMNS[c].to_string()).collect();
        let body: Vec<(bool, Vec<String>)> = leaderboard
            .rows
            .iter()
            .map(|row| {
                let all = cells(row);
                (row.highlight, SHOWN.iter().map(|&c| all[c].clone()).collect())
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for (_, cells) in &body {
            for (w, c) in widths.iter_mut().zip(cells) {
                *w = (*w).max(c.chars().count());
            }
        }
        let render = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c}{}", " ".repeat(w - c.chars().count())))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut output = format!(
            "Leaderboard: {} (as of {}, {} of {} replicates)\n\n",
            leaderboard.variant,
            leaderboard.as_of,
            leaderboard.simulation.replicates_valid,
            leaderboard.simulation.replicates_requested,
        );
        output.push_str(&render(&header));
        output.push('\n');
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        output.push_str(&"─".repeat(rule));
        output.push('\n');
        for (highlighted, cells) in &body {
            let (start, end) = self.highlight(*highlighted);
            output.push_str(&format!("{start}{}{end}\n", render(cells)));
        }
        Ok(output)
    }
}
