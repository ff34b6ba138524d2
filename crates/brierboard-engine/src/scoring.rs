//! Per-type difficulty-adjusted scoring shared by the observed leaderboard and every
//! bootstrap replicate: fit each panel, rescale against Always 0.5, combine axes.

use brierboard_core::config::OverallPolicy;
use brierboard_core::constants::{models, ALWAYS_HALF_TARGET_SCORE};
use brierboard_core::errors::LeaderboardError;
use brierboard_core::types::{Forecaster, QuestionType};
use serde::{Deserialize, Serialize};

use crate::fixed_effects::{FitSample, FixedEffectsEstimator, FixedEffectsModel, Panel};
use crate::score_matrix::ScoreMatrix;

/// Which score column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Dataset,
    Market,
    Overall,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Dataset, Axis::Market, Axis::Overall];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Dataset => "dataset",
            Axis::Market => "market",
            Axis::Overall => "overall",
        }
    }
}

impl From<QuestionType> for Axis {
    fn from(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Dataset => Axis::Dataset,
            QuestionType::Market => Axis::Market,
        }
    }
}

/// One forecaster's scores. `None` means undefined, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    pub dataset: Option<f64>,
    pub market: Option<f64>,
    pub overall: Option<f64>,
}

impl AxisScores {
    pub fn new(dataset: Option<f64>, market: Option<f64>, policy: OverallPolicy) -> Self {
        Self {
            dataset,
            market,
            overall: combine_overall(dataset, market, policy),
        }
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Dataset => self.dataset,
            Axis::Market => self.market,
            Axis::Overall => self.overall,
        }
    }
}

/// Equal-weighted overall score.
pub fn combine_overall(
    dataset: Option<f64>,
    market: Option<f64>,
    policy: OverallPolicy,
) -> Option<f64> {
    match (dataset, market, policy) {
        (Some(d), Some(m), _) => Some((d + m) / 2.0),
        (Some(v), None, OverallPolicy::CarryForward) | (None, Some(v), OverallPolicy::CarryForward) => {
            Some(v)
        }
        _ => None,
    }
}

/// Shift so the reference lands exactly on the target. Ordering is unchanged.
pub fn rescale(value: f64, reference: f64) -> f64 {
    (value - reference) + ALWAYS_HALF_TARGET_SCORE
}

/// Result of scoring every panel once.
#[derive(Debug, Clone)]
pub struct ScoredRun {
    /// Rescaled scores, indexed by matrix forecaster.
    pub scores: Vec<AxisScores>,
    /// Fitted model per question type; `None` when the type has no questions.
    pub models: Vec<(QuestionType, Option<FixedEffectsModel>)>,
}

/// Scores a fixed set of panels under arbitrary question weights.
#[derive(Debug, Clone)]
pub struct Scorer {
    panels: Vec<Panel>,
    estimator: FixedEffectsEstimator,
    policy: OverallPolicy,
    reference: Option<usize>,
    n_forecasters: usize,
}

impl Scorer {
    /// One panel per question type, keeping forecasters accepted by `keep`. The
    /// reference is the benchmark's Always 0.5 forecaster.
    pub fn from_matrix(
        matrix: &ScoreMatrix,
        fit_sample: &FitSample,
        estimator: FixedEffectsEstimator,
        policy: OverallPolicy,
        keep: impl Fn(&Forecaster) -> bool,
    ) -> Self {
        let panels = QuestionType::ALL
            .iter()
            .map(|qt| Panel::from_matrix(matrix, *qt, fit_sample, &keep))
            .collect();
        let reference = matrix.index_of(&brierboard_core::ForecasterId::benchmark(models::ALWAYS_HALF));
        Self {
            panels,
            estimator,
            policy,
            reference,
            n_forecasters: matrix.forecasters().len(),
        }
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn policy(&self) -> OverallPolicy {
        self.policy
    }

    /// Score with every question drawn once.
    pub fn score_observed(&self) -> Result<ScoredRun, LeaderboardError> {
        let weights: Vec<Vec<f64>> = self.panels.iter().map(Panel::unit_weights).collect();
        self.score(&weights)
    }

    /// Score with per-panel question weights.
    pub fn score(&self, weights: &[Vec<f64>]) -> Result<ScoredRun, LeaderboardError> {
        let mut axes: Vec<Vec<Option<f64>>> = Vec::with_capacity(self.panels.len());
        let mut fitted = Vec::with_capacity(self.panels.len());

        for (panel, w) in self.panels.iter().zip(weights) {
            if panel.is_empty() {
                axes.push(vec![None; self.n_forecasters]);
                fitted.push((panel.question_type, None));
                continue;
            }
            let (model, raw) = self.estimator.score(panel, w)?;
            axes.push(self.rescale_axis(panel.question_type, raw)?);
            fitted.push((panel.question_type, Some(model)));
        }

        let axis_of = |qt: QuestionType| {
            self.panels
                .iter()
                .position(|p| p.question_type == qt)
                .map(|i| &axes[i])
        };
        let dataset = axis_of(QuestionType::Dataset);
        let market = axis_of(QuestionType::Market);
        let scores = (0..self.n_forecasters)
            .map(|f| {
                AxisScores::new(
                    dataset.and_then(|a| a[f]),
                    market.and_then(|a| a[f]),
                    self.policy,
                )
            })
            .collect();

        Ok(ScoredRun {
            scores,
            models: fitted,
        })
    }

    fn rescale_axis(
        &self,
        question_type: QuestionType,
        raw: Vec<Option<f64>>,
    ) -> Result<Vec<Option<f64>>, LeaderboardError> {
        if raw.iter().all(Option::is_none) {
            return Ok(raw);
        }
        let reference = self
            .reference
            .and_then(|r| raw[r])
            .ok_or_else(|| LeaderboardError::MissingReference {
                model: models::ALWAYS_HALF.to_string(),
                axis: question_type.to_string(),
            })?;
        Ok(raw
            .into_iter()
            .map(|v| v.map(|v| rescale(v, reference)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_overall_policies() {
        let rb = OverallPolicy::RequireBoth;
        let cf = OverallPolicy::CarryForward;
        assert_eq!(combine_overall(Some(0.2), Some(0.3), rb), Some(0.25));
        assert_eq!(combine_overall(Some(0.2), None, rb), None);
        assert_eq!(combine_overall(None, Some(0.3), cf), Some(0.3));
        assert_eq!(combine_overall(None, None, cf), None);
    }

    #[test]
    fn test_rescale_reference_is_exact() {
        for r in [0.0, 0.1234567, 0.3, -0.07, 0.9999] {
            assert_eq!(rescale(r, r), 0.25);
        }
    }

    #[test]
    fn test_rescale_preserves_order() {
        let r = 0.31;
        assert!(rescale(0.1, r) < rescale(0.2, r));
    }
}
