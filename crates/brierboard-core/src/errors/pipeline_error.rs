//! Run-level errors.

use super::error_code::{self, BrierboardErrorCode};
use super::{
    ConfigError, FixedEffectsError, InputError, LeaderboardError, OutputError,
    ScoreMatrixError, SimulationError,
};

/// Errors that abort a leaderboard run. Aggregates subsystem errors via `From`.
/// Any of these blocks publication of a new snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Score matrix error: {0}")]
    ScoreMatrix(#[from] ScoreMatrixError),

    #[error("Fixed effects error: {0}")]
    FixedEffects(#[from] FixedEffectsError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("{} task(s) failed: {}", failed.len(), failed.join(", "))]
    TasksFailed { failed: Vec<String> },
}

impl BrierboardErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::ScoreMatrix(e) => e.error_code(),
            Self::FixedEffects(e) => e.error_code(),
            Self::Simulation(e) => e.error_code(),
            Self::Leaderboard(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::TasksFailed { .. } => error_code::TASK_FAILED,
        }
    }
}
