//! CSV reporter: the published `leaderboard.csv`.

use brierboard_core::errors::OutputError;

use super::format::{cells, COLUMNS};
use super::Reporter;
use crate::leaderboard::Leaderboard;

pub struct CsvReporter;

/// Quote a field when it contains a delimiter, quote, or line break.
pub fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(fields: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    let mut out = fields
        .into_iter()
        .map(|f| escape(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    out
}

impl Reporter for CsvReporter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn file_name(&self) -> Option<&'static str> {
        Some("leaderboard.csv")
    }

    fn generate(&self, leaderboard: &Leaderboard) -> Result<String, OutputError> {
        let mut out = line(COLUMNS);
        for row in &leaderboard.rows {
            out.push_str(&line(cells(row)));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("[0.1, 0.2]"), "\"[0.1, 0.2]\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
