//! Error handling for brierboard.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod fixed_effects_error;
pub mod input_error;
pub mod leaderboard_error;
pub mod output_error;
pub mod pipeline_error;
pub mod score_matrix_error;
pub mod simulation_error;

pub use config_error::ConfigError;
pub use error_code::BrierboardErrorCode;
pub use fixed_effects_error::FixedEffectsError;
pub use input_error::InputError;
pub use leaderboard_error::LeaderboardError;
pub use output_error::OutputError;
pub use pipeline_error::PipelineError;
pub use score_matrix_error::ScoreMatrixError;
pub use simulation_error::SimulationError;
