//! Builds one variant's leaderboard from a run's inputs.

use std::collections::BTreeSet;

use brierboard_core::config::{BrierboardConfig, OverallPolicy, VariantConfig};
use brierboard_core::errors::{LeaderboardError, PipelineError};
use brierboard_core::types::forecaster::is_oracle_name;
use brierboard_core::types::{ForecastRecord, Forecaster, ForecasterId};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use super::oracle::{oracle_equivalent, oracle_id, oracle_records, ORACLE_STEPS};
use super::peer::peer_and_bss;
use super::ranking::{min_ranks, sort_rows};
use super::types::{Leaderboard, LeaderboardRow, ScoreColumn, SimulationMeta};
use crate::fixed_effects::{FitSample, FixedEffectsEstimator, QuestionFixedEffect};
use crate::inputs::RunInputs;
use crate::reference::{answered_questions, synthesize_references};
use crate::score_matrix::{ScoreMatrix, ScoreMatrixBuilder};
use crate::scoring::{ScoredRun, Scorer};
use crate::simulation::RankStabilitySimulator;

fn not_oracle(forecaster: &Forecaster) -> bool {
    !(forecaster.id.is_benchmark() && is_oracle_name(&forecaster.id.model))
}

/// Runs the full scoring pipeline for a variant as of a date.
#[derive(Debug, Clone)]
pub struct LeaderboardAssembler {
    config: BrierboardConfig,
    as_of: NaiveDate,
}

impl LeaderboardAssembler {
    pub fn new(config: BrierboardConfig, as_of: NaiveDate) -> Self {
        Self { config, as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn assemble(
        &self,
        inputs: &RunInputs,
        variant: &VariantConfig,
    ) -> Result<Leaderboard, PipelineError> {
        let span = brierboard_core::assemble_span!(variant.name);
        let _guard = span.enter();
        let settings = &self.config.leaderboard;
        let policy = settings.effective_overall_policy();

        let records: Vec<ForecastRecord> = inputs
            .records
            .iter()
            .filter(|r| variant.includes(&r.forecaster))
            .cloned()
            .collect();
        let mut records = self.apply_inclusion_delay(records);

        let questions = answered_questions(&records, &inputs.questions);
        if settings.effective_synthesize_references() {
            let synthesized =
                synthesize_references(&records, &questions, self.config.simulation.effective_seed());
            records.extend(synthesized);
        }
        let with_oracles = settings.effective_oracles();
        if with_oracles {
            records.extend(oracle_records(&questions, &inputs.resolutions));
        }

        let matrix = ScoreMatrixBuilder::new(self.config.sources.clone())
            .with_imputed_cutoff_pct(settings.effective_imputed_cutoff_pct())
            .with_profiles(inputs.profiles.clone())
            .build(&records, &inputs.resolutions)?;

        let fit_sample = FitSample {
            release_cutoff_days: settings.effective_model_release_cutoff_days(),
        };
        let estimator = FixedEffectsEstimator::from_config(&self.config.fixed_effects);
        let scorer = Scorer::from_matrix(&matrix, &fit_sample, estimator, policy, not_oracle);
        let observed = scorer.score_observed()?;

        let oracle_scores = if with_oracles {
            Self::oracle_scores(&matrix, &fit_sample, estimator, policy)?
        } else {
            Vec::new()
        };

        let summary = RankStabilitySimulator::from_config(&self.config.simulation)
            .run(&scorer, &observed.scores)?;
        let comparisons = peer_and_bss(&matrix, policy, not_oracle);

        let mut rows: Vec<LeaderboardRow> = matrix
            .forecasters()
            .iter()
            .enumerate()
            .filter(|(_, f)| not_oracle(f))
            .map(|(i, f)| {
                let scores = observed.scores[i];
                let counts = matrix.counts(i);
                let sim = summary.get(i).cloned().unwrap_or_default();
                let (peer, bss) = comparisons[i];
                LeaderboardRow {
                    rank: None,
                    forecaster: f.id.clone(),
                    model_organization: f.model_organization.clone(),
                    kind: f.kind,
                    highlight: f.is_highlighted(),
                    dataset: ScoreColumn {
                        score: scores.dataset,
                        n: counts.dataset,
                        ci: sim.dataset_ci,
                    },
                    market: ScoreColumn {
                        score: scores.market,
                        n: counts.market,
                        ci: sim.market_ci,
                    },
                    overall: ScoreColumn {
                        score: scores.overall,
                        n: counts.total(),
                        ci: sim.overall_ci,
                    },
                    p_value: sim.p_value,
                    p_value_bh: sim.p_value_bh,
                    pct_first: sim.pct_first,
                    pct_top5: sim.pct_top5,
                    oracle_equivalent: if with_oracles {
                        oracle_equivalent(scores.overall, &oracle_scores)
                    } else {
                        None
                    },
                    peer,
                    bss,
                }
            })
            .collect();

        let overall: Vec<Option<f64>> = rows.iter().map(|r| r.overall.score).collect();
        for (row, rank) in rows.iter_mut().zip(min_ranks(&overall)) {
            row.rank = rank;
        }
        sort_rows(&mut rows);

        let question_fixed_effects = Self::question_fixed_effects(&scorer, &observed);
        info!(
            variant = %variant.name,
            rows = rows.len(),
            ranked = rows.iter().filter(|r| r.rank.is_some()).count(),
            questions = matrix.questions().len(),
            "leaderboard assembled"
        );

        Ok(Leaderboard {
            variant: variant.name.clone(),
            as_of: self.as_of,
            rows,
            simulation: SimulationMeta {
                replicates_requested: summary.replicates_requested,
                replicates_valid: summary.replicates_valid,
                seed: summary.seed,
            },
            question_fixed_effects,
        })
    }

    /// Drop forecast sets whose due date is less than the inclusion delay before
    /// `as_of`. A forecaster with no set old enough has no row yet; an established
    /// forecaster's recent sets wait the same delay.
    pub fn apply_inclusion_delay(&self, records: Vec<ForecastRecord>) -> Vec<ForecastRecord> {
        let delay = Duration::days(self.config.leaderboard.effective_inclusion_delay_days());
        let (published, pending): (Vec<ForecastRecord>, Vec<ForecastRecord>) = records
            .into_iter()
            .partition(|r| r.question.forecast_due_date + delay <= self.as_of);
        if pending.is_empty() {
            return published;
        }
        let mut held: BTreeSet<(&ForecasterId, NaiveDate)> = BTreeSet::new();
        for r in &pending {
            held.insert((&r.forecaster, r.question.forecast_due_date));
        }
        for (id, due) in &held {
            debug!(forecaster = %id, due = %due, "forecast set inside the inclusion delay");
        }
        info!(
            forecast_sets = held.len(),
            forecasts = pending.len(),
            "forecast sets held back by the inclusion delay"
        );
        published
    }

    /// Overall score of every oracle, indexed by step. Oracles never inform
    /// difficulty, so scoring them alongside everyone else leaves other rows unchanged.
    fn oracle_scores(
        matrix: &ScoreMatrix,
        fit_sample: &FitSample,
        estimator: FixedEffectsEstimator,
        policy: OverallPolicy,
    ) -> Result<Vec<Option<f64>>, LeaderboardError> {
        let indices: Vec<Option<usize>> = (0..=ORACLE_STEPS)
            .map(|step| matrix.index_of(&oracle_id(step)))
            .collect();
        if indices.iter().all(Option::is_none) {
            return Ok(vec![None; indices.len()]);
        }
        if let Some(step) = indices.iter().position(Option::is_none) {
            return Err(LeaderboardError::MissingOracle {
                model: oracle_id(step as u32).model,
            });
        }
        let run = Scorer::from_matrix(matrix, fit_sample, estimator, policy, |_| true).score_observed()?;
        Ok(indices
            .into_iter()
            .map(|i| i.and_then(|i| run.scores[i].overall))
            .collect())
    }

    fn question_fixed_effects(scorer: &Scorer, run: &ScoredRun) -> Vec<QuestionFixedEffect> {
        scorer
            .panels()
            .iter()
            .zip(&run.models)
            .filter_map(|(panel, (_, model))| {
                model
                    .as_ref()
                    .map(|m| FixedEffectsEstimator::question_effects(m, panel))
            })
            .flatten()
            .collect()
    }
}
