//! Score matrix: sparse per-(forecaster, question) Brier scores.

pub mod builder;
pub mod types;

pub use builder::ScoreMatrixBuilder;
pub use types::{ExclusionReport, ScoreCell, ScoreMatrix, ScoredQuestion, TypeCounts};
