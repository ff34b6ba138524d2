//! Rank stability simulation errors.

use super::error_code::{self, BrierboardErrorCode};
use super::FixedEffectsError;

/// Errors that abort the resampling run.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Replicate count must be at least 1")]
    NoReplicates,

    #[error("Failed to build simulation thread pool: {0}")]
    ThreadPool(String),

    #[error("Replicate {replicate} did not converge: {source}")]
    NonConvergence {
        replicate: u32,
        source: FixedEffectsError,
    },
}

impl BrierboardErrorCode for SimulationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NonConvergence { source, .. } => source.error_code(),
            _ => error_code::SIMULATION_ERROR,
        }
    }
}
