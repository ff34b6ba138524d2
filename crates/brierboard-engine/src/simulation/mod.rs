//! Rank stability simulation: stratified question bootstrap with full refits.

pub mod aggregate;
pub mod resample;
pub mod simulator;
pub mod types;

pub use resample::{replicate_seed, Strata};
pub use simulator::RankStabilitySimulator;
pub use types::{ForecasterSimulation, SimulationSummary};
