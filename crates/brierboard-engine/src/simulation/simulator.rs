//! Parallel bootstrap driver.

use std::time::Instant;

use brierboard_core::config::{CiMethod, SimulationConfig};
use brierboard_core::constants::{DEFAULT_REPLICATES, DEFAULT_SEED};
use brierboard_core::errors::{FixedEffectsError, LeaderboardError, SimulationError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::aggregate::{aggregate, observed_best};
use super::resample::{replicate_seed, Strata};
use super::types::SimulationSummary;
use crate::scoring::{AxisScores, Scorer};

/// How one replicate ended.
enum Replicate {
    Scored(Vec<AxisScores>),
    /// Could not be scored for a non-numerical reason, e.g. a draw with no reference.
    Dropped,
    Diverged(FixedEffectsError),
}

/// Resamples questions `replicates` times and rescores everyone on each draw.
///
/// Replicate `i` always uses the stream seeded by `replicate_seed(seed, i)`, so a
/// run is reproducible regardless of thread count.
#[derive(Debug, Clone)]
pub struct RankStabilitySimulator {
    replicates: u32,
    seed: u64,
    threads: usize,
    ci_method: CiMethod,
}

impl Default for RankStabilitySimulator {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICATES, DEFAULT_SEED)
    }
}

impl RankStabilitySimulator {
    pub fn new(replicates: u32, seed: u64) -> Self {
        Self {
            replicates,
            seed,
            threads: 0,
            ci_method: CiMethod::Percentile,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.effective_replicates(), config.effective_seed())
            .with_threads(config.effective_threads())
            .with_ci_method(config.effective_ci_method())
    }

    /// Dedicated pool size. 0 uses the global rayon pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_ci_method(mut self, ci_method: CiMethod) -> Self {
        self.ci_method = ci_method;
        self
    }

    pub fn replicates(&self) -> u32 {
        self.replicates
    }

    pub fn run(
        &self,
        scorer: &Scorer,
        observed: &[AxisScores],
    ) -> Result<SimulationSummary, SimulationError> {
        if self.replicates == 0 {
            return Err(SimulationError::NoReplicates);
        }
        let span = brierboard_core::simulate_span!(self.replicates, self.seed);
        let _guard = span.enter();
        let started = Instant::now();

        let strata: Vec<Strata> = scorer.panels().iter().map(Strata::from_panel).collect();
        let run_one = |idx: u32| -> Replicate {
            let mut rng = StdRng::seed_from_u64(replicate_seed(self.seed, idx));
            let weights: Vec<Vec<f64>> = strata.iter().map(|s| s.draw_weights(&mut rng)).collect();
            match scorer.score(&weights) {
                Ok(run) => Replicate::Scored(run.scores),
                Err(LeaderboardError::FixedEffects(e @ FixedEffectsError::NonConvergence { .. })) => {
                    Replicate::Diverged(e)
                }
                Err(e) => {
                    debug!(replicate = idx, error = %e, "replicate dropped");
                    Replicate::Dropped
                }
            }
        };

        let outcomes: Vec<Replicate> = if self.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
            pool.install(|| (0..self.replicates).into_par_iter().map(run_one).collect())
        } else {
            (0..self.replicates).into_par_iter().map(run_one).collect()
        };

        // Non-convergence fails the run; lowest replicate index reported.
        let mut valid: Vec<Vec<AxisScores>> = Vec::with_capacity(outcomes.len());
        for (idx, outcome) in (0u32..).zip(outcomes) {
            match outcome {
                Replicate::Scored(scores) => valid.push(scores),
                Replicate::Dropped => {}
                Replicate::Diverged(source) => {
                    return Err(SimulationError::NonConvergence {
                        replicate: idx,
                        source,
                    });
                }
            }
        }
        let failed = self.replicates - valid.len() as u32;
        if failed > 0 {
            warn!(failed_replicates = failed, "some replicates could not be scored and were dropped");
        }

        let forecasters = aggregate(observed, &valid, self.ci_method);
        info!(
            valid = valid.len(),
            failed_replicates = failed,
            simulation_time_ms = started.elapsed().as_millis() as u64,
            "simulation complete"
        );

        Ok(SimulationSummary {
            replicates_requested: self.replicates,
            replicates_valid: valid.len() as u32,
            replicates_failed: failed,
            seed: self.seed,
            best: observed_best(observed),
            forecasters,
        })
    }
}
