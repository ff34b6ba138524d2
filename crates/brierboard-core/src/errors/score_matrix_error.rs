//! Score matrix errors.

use super::error_code::{self, BrierboardErrorCode};

/// Structural failures while building the score matrix. Individual bad records are
/// excluded and logged, never raised.
#[derive(Debug, thiserror::Error)]
pub enum ScoreMatrixError {
    #[error("No scoreable forecasts: every record was unresolved, late, or malformed")]
    Empty,
}

impl BrierboardErrorCode for ScoreMatrixError {
    fn error_code(&self) -> &'static str {
        error_code::EMPTY_MATRIX
    }
}
