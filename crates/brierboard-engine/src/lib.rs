//! # brierboard-engine
//!
//! Scoring and ranking engine: builds the Brier score matrix, fits two-way fixed
//! effects, resamples questions for rank stability, assembles the leaderboard, and
//! tracks the SOTA frontier with a parity projection.

pub mod fixed_effects;
pub mod inputs;
pub mod leaderboard;
pub mod pipeline;
pub mod reference;
pub mod reporters;
pub mod score_matrix;
pub mod scoring;
pub mod simulation;
pub mod sota;
pub mod stats;

pub use fixed_effects::{FixedEffectsEstimator, FixedEffectsModel};
pub use leaderboard::{Leaderboard, LeaderboardAssembler, LeaderboardRow};
pub use score_matrix::{ScoreMatrix, ScoreMatrixBuilder};
pub use simulation::{RankStabilitySimulator, SimulationSummary};
pub use sota::{compute_sota_and_trend, SotaPoint, TrendModel};
