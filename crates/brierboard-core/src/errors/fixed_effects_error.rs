//! Two-way fixed effects errors.

use super::error_code::{self, BrierboardErrorCode};

/// Errors fitting the forecaster/question decomposition.
#[derive(Debug, thiserror::Error)]
pub enum FixedEffectsError {
    #[error("Cannot fit fixed effects on an empty score matrix")]
    EmptyMatrix,

    #[error("Fixed effects did not converge after {iterations} iterations (last change {last_change:e}, tolerance {tolerance:e})")]
    NonConvergence {
        iterations: u32,
        last_change: f64,
        tolerance: f64,
    },

    #[error("No fit-sample forecaster answered question {question}")]
    UnestimatedQuestion { question: String },
}

impl BrierboardErrorCode for FixedEffectsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMatrix => error_code::EMPTY_MATRIX,
            Self::NonConvergence { .. } => error_code::NON_CONVERGENCE,
            Self::UnestimatedQuestion { .. } => error_code::FIXED_EFFECTS_ERROR,
        }
    }
}
