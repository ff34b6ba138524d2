//! Fixed effects estimator configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FE_MAX_ITERATIONS, DEFAULT_FE_TOLERANCE};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixedEffectsConfig {
    /// Stop when no effect moves by more than this. Default: 1e-10.
    pub tolerance: Option<f64>,
    /// Iteration ceiling. Default: 10000.
    pub max_iterations: Option<u32>,
}

impl FixedEffectsConfig {
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_FE_TOLERANCE)
    }

    pub fn effective_max_iterations(&self) -> u32 {
        self.max_iterations.unwrap_or(DEFAULT_FE_MAX_ITERATIONS)
    }
}
