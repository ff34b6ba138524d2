//! Rank stability simulation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REPLICATES, DEFAULT_SEED};

/// Bootstrap confidence interval method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CiMethod {
    #[default]
    Percentile,
    /// Bias-corrected percentile; the acceleration term is taken as zero.
    Bca,
}

impl std::str::FromStr for CiMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentile" => Ok(Self::Percentile),
            "bca" => Ok(Self::Bca),
            other => Err(format!("unknown CI method: {other}")),
        }
    }
}

/// Configuration for the resampling run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of bootstrap replicates. Default: 1999.
    pub replicates: Option<u32>,
    /// Base seed; each replicate derives its own stream from it.
    pub seed: Option<u64>,
    /// Worker threads. 0 or unset uses the global rayon pool.
    pub threads: Option<usize>,
    /// CI method. Default: percentile.
    pub ci_method: Option<CiMethod>,
}

impl SimulationConfig {
    pub fn effective_replicates(&self) -> u32 {
        self.replicates.unwrap_or(DEFAULT_REPLICATES)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_ci_method(&self) -> CiMethod {
        self.ci_method.unwrap_or_default()
    }
}
