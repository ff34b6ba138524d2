//! Leaderboard assembly: scores, comparisons, oracle equivalents, and ranks.

pub mod assembler;
pub mod oracle;
pub mod peer;
pub mod ranking;
pub mod types;

pub use assembler::LeaderboardAssembler;
pub use types::{Leaderboard, LeaderboardRow, ScoreColumn, SimulationMeta};
