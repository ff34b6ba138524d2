//! Leaderboard assembly errors.

use super::error_code::{self, BrierboardErrorCode};
use super::FixedEffectsError;

/// Errors assembling ranked rows.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Reference forecaster {model} has no {axis} score; cannot rescale")]
    MissingReference { model: String, axis: String },

    #[error("Oracle {model} missing from scored rows")]
    MissingOracle { model: String },

    #[error("Scoring failed: {0}")]
    FixedEffects(#[from] FixedEffectsError),
}

impl BrierboardErrorCode for LeaderboardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingReference { .. } => error_code::MISSING_REFERENCE,
            Self::MissingOracle { .. } => error_code::LEADERBOARD_ERROR,
            Self::FixedEffects(e) => e.error_code(),
        }
    }
}
