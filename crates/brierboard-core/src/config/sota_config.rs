//! SOTA tracker configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{models, DEFAULT_PROJECTION_HORIZON_YEARS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SotaConfig {
    /// A new point must beat the running best by more than this. Default: 0.0.
    pub tolerance: Option<f64>,
    /// Parity dates further out than this many years are suppressed. Default: 20.
    pub projection_horizon_years: Option<u32>,
    /// Human baseline the parity date is projected against.
    pub baseline_model: Option<String>,
}

impl SotaConfig {
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(0.0)
    }

    pub fn effective_projection_horizon_years(&self) -> u32 {
        self.projection_horizon_years
            .unwrap_or(DEFAULT_PROJECTION_HORIZON_YEARS)
    }

    pub fn effective_baseline_model(&self) -> String {
        self.baseline_model
            .clone()
            .unwrap_or_else(|| models::SUPERFORECASTER_MEDIAN.to_string())
    }
}
