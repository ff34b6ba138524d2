//! Weighted alternating least squares for the two-way decomposition.

use brierboard_core::config::FixedEffectsConfig;
use brierboard_core::constants::{DEFAULT_FE_MAX_ITERATIONS, DEFAULT_FE_TOLERANCE};
use brierboard_core::errors::FixedEffectsError;
use tracing::{debug, warn};

use super::components::count_components;
use super::panel::Panel;
use super::types::{FixedEffectsModel, QuestionFixedEffect};

/// Fits `score ≈ μ + α_f + β_q` on a panel's fit-sample cells.
///
/// Each sweep solves for every β given α, then every α given β, then recenters β to
/// mean zero. Stops once no effect moves by `tolerance` or more.
#[derive(Debug, Clone, Copy)]
pub struct FixedEffectsEstimator {
    tolerance: f64,
    max_iterations: u32,
}

impl Default for FixedEffectsEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_FE_TOLERANCE, DEFAULT_FE_MAX_ITERATIONS)
    }
}

impl FixedEffectsEstimator {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn from_config(config: &FixedEffectsConfig) -> Self {
        Self::new(config.effective_tolerance(), config.effective_max_iterations())
    }

    /// Fit with per-question weights (bootstrap multiplicities; 1.0 for the observed data).
    pub fn fit(&self, panel: &Panel, weights: &[f64]) -> Result<FixedEffectsModel, FixedEffectsError> {
        let span = brierboard_core::fit_span!(panel.question_type, panel.cells.len());
        let _guard = span.enter();

        let nq = panel.n_questions();
        let nf = panel.n_forecasters;
        let weight = |q: usize| weights.get(q).copied().unwrap_or(0.0);

        let fit_cells: Vec<(usize, usize, f64, f64)> = panel
            .cells
            .iter()
            .filter(|c| c.in_fit && weight(c.question) > 0.0)
            .map(|c| (c.forecaster, c.question, c.score, weight(c.question)))
            .collect();
        let drawn = (0..nq).any(|q| weight(q) > 0.0);
        if !drawn {
            return Err(FixedEffectsError::EmptyMatrix);
        }

        let mut q_weight = vec![0.0; nq];
        let mut f_weight = vec![0.0; nf];
        let (mut total_w, mut total_wy) = (0.0, 0.0);
        for &(f, q, y, w) in &fit_cells {
            q_weight[q] += w;
            f_weight[f] += w;
            total_w += w;
            total_wy += w * y;
        }
        if let Some(q) = (0..nq).find(|&q| weight(q) > 0.0 && q_weight[q] == 0.0) {
            return Err(FixedEffectsError::UnestimatedQuestion {
                question: panel.questions[q].key.primary_key(),
            });
        }

        let mu = total_wy / total_w;
        let mut alpha = vec![0.0; nf];
        let mut beta = vec![0.0; nq];
        let estimated_q: Vec<usize> = (0..nq).filter(|&q| q_weight[q] > 0.0).collect();
        let fitted_f: Vec<usize> = (0..nf).filter(|&f| f_weight[f] > 0.0).collect();

        let mut num_q = vec![0.0; nq];
        let mut num_f = vec![0.0; nf];
        let mut converged_at = None;
        let mut last_change = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            num_q.iter_mut().for_each(|v| *v = 0.0);
            for &(f, q, y, w) in &fit_cells {
                num_q[q] += w * (y - mu - alpha[f]);
            }
            let mut change: f64 = 0.0;
            let mut new_beta = beta.clone();
            for &q in &estimated_q {
                new_beta[q] = num_q[q] / q_weight[q];
            }

            num_f.iter_mut().for_each(|v| *v = 0.0);
            for &(f, q, y, w) in &fit_cells {
                num_f[f] += w * (y - mu - new_beta[q]);
            }
            let mut new_alpha = alpha.clone();
            for &f in &fitted_f {
                new_alpha[f] = num_f[f] / f_weight[f];
            }

            let shift = estimated_q.iter().map(|&q| new_beta[q]).sum::<f64>() / estimated_q.len() as f64;
            for &q in &estimated_q {
                new_beta[q] -= shift;
                change = change.max((new_beta[q] - beta[q]).abs());
            }
            for &f in &fitted_f {
                new_alpha[f] += shift;
                change = change.max((new_alpha[f] - alpha[f]).abs());
            }

            alpha = new_alpha;
            beta = new_beta;
            last_change = change;
            if change < self.tolerance {
                converged_at = Some(iteration);
                break;
            }
        }

        let Some(iterations) = converged_at else {
            return Err(FixedEffectsError::NonConvergence {
                iterations: self.max_iterations,
                last_change,
                tolerance: self.tolerance,
            });
        };

        let components = count_components(nf, nq, fit_cells.iter().map(|&(f, q, _, _)| (f, q)));
        if components > 1 {
            warn!(
                question_type = %panel.question_type,
                components,
                "forecaster/question graph is disconnected; effects are not comparable across components"
            );
        }
        debug!(fit_iterations = iterations, components, grand_mean = mu, "fixed effects converged");

        Ok(FixedEffectsModel {
            grand_mean: mu,
            forecaster_effect: (0..nf)
                .map(|f| (f_weight[f] > 0.0).then_some(alpha[f]))
                .collect(),
            question_effect: (0..nq)
                .map(|q| (q_weight[q] > 0.0).then_some(beta[q]))
                .collect(),
            iterations,
            components,
        })
    }

    /// Difficulty-adjusted score per forecaster: weighted mean of `score − β_q` over every
    /// drawn question the forecaster answered, fit sample or not. Equals `μ + α_f` for
    /// fitted forecasters.
    pub fn adjusted_scores(
        model: &FixedEffectsModel,
        panel: &Panel,
        weights: &[f64],
    ) -> Vec<Option<f64>> {
        let mut sum = vec![0.0; panel.n_forecasters];
        let mut den = vec![0.0; panel.n_forecasters];
        for cell in &panel.cells {
            let w = weights.get(cell.question).copied().unwrap_or(0.0);
            if w <= 0.0 {
                continue;
            }
            if let Some(beta) = model.question_effect[cell.question] {
                sum[cell.forecaster] += w * (cell.score - beta);
                den[cell.forecaster] += w;
            }
        }
        sum.into_iter()
            .zip(den)
            .map(|(s, d)| (d > 0.0).then(|| s / d))
            .collect()
    }

    /// Fit and score in one step.
    pub fn score(
        &self,
        panel: &Panel,
        weights: &[f64],
    ) -> Result<(FixedEffectsModel, Vec<Option<f64>>), FixedEffectsError> {
        let model = self.fit(panel, weights)?;
        let adjusted = Self::adjusted_scores(&model, panel, weights);
        Ok((model, adjusted))
    }

    /// The published question effects, in panel order.
    pub fn question_effects(model: &FixedEffectsModel, panel: &Panel) -> Vec<QuestionFixedEffect> {
        panel
            .questions
            .iter()
            .zip(&model.question_effect)
            .filter_map(|(q, beta)| {
                beta.map(|b| QuestionFixedEffect {
                    question: q.key.clone(),
                    question_fixed_effect: b,
                })
            })
            .collect()
    }
}
