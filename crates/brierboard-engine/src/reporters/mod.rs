//! Reporters: output formats for an assembled leaderboard.

pub mod console;
pub mod csv;
pub mod format;
pub mod json;

use brierboard_core::errors::OutputError;

use crate::leaderboard::Leaderboard;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    /// File the report is published as, if it is a snapshot artifact.
    fn file_name(&self) -> Option<&'static str>;
    fn generate(&self, leaderboard: &Leaderboard) -> Result<String, OutputError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Result<Box<dyn Reporter>, OutputError> {
    match format {
        "csv" => Ok(Box::new(csv::CsvReporter)),
        "json" => Ok(Box::new(json::JsonReporter)),
        "console" => Ok(Box::new(console::ConsoleReporter::default())),
        other => Err(OutputError::UnknownFormat(other.to_string())),
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["csv", "json", "console"]
}

/// Formats written into every published snapshot.
pub fn snapshot_formats() -> &'static [&'static str] {
    &["csv", "json"]
}
