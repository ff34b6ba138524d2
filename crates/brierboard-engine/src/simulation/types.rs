//! Simulation results.

use serde::{Deserialize, Serialize};

/// Per-forecaster statistics over the valid replicates. Every field is `None` when
/// it could not be computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecasterSimulation {
    pub dataset_ci: Option<(f64, f64)>,
    pub market_ci: Option<(f64, f64)>,
    pub overall_ci: Option<(f64, f64)>,
    /// Percent of replicates ranked #1 (ties count for everyone tied).
    pub pct_first: Option<f64>,
    /// Percent of replicates at or below that replicate's 5th percentile.
    pub pct_top5: Option<f64>,
    /// One-sided p-value against the observed best forecaster. `None` for the best row.
    pub p_value: Option<f64>,
    /// Benjamini–Hochberg adjusted `p_value`.
    pub p_value_bh: Option<f64>,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub replicates_requested: u32,
    pub replicates_valid: u32,
    pub replicates_failed: u32,
    pub seed: u64,
    /// Matrix index of the observed best forecaster.
    pub best: Option<usize>,
    /// Indexed by matrix forecaster.
    pub forecasters: Vec<ForecasterSimulation>,
}

impl SimulationSummary {
    pub fn get(&self, forecaster: usize) -> Option<&ForecasterSimulation> {
        self.forecasters.get(forecaster)
    }
}
