//! Joins forecasts with resolutions into a score matrix.

use std::collections::{BTreeMap, HashMap};

use brierboard_core::config::SourceConfig;
use brierboard_core::constants::DEFAULT_IMPUTED_CUTOFF_PCT;
use brierboard_core::errors::ScoreMatrixError;
use chrono::NaiveDate;
use brierboard_core::types::{
    ForecastRecord, Forecaster, ForecasterId, ForecasterProfile, QuestionKey, ResolutionValue,
};
use tracing::{debug, info, warn};

use super::types::{ExclusionReport, ScoreCell, ScoreMatrix, ScoredQuestion};

/// Resolution state of one question.
enum Outcome {
    Resolved(f64),
    Malformed,
}

/// Builds a [`ScoreMatrix`]. Stateless apart from its settings; `build` is pure.
#[derive(Debug, Clone)]
pub struct ScoreMatrixBuilder {
    sources: SourceConfig,
    imputed_cutoff_pct: f64,
    profiles: Vec<ForecasterProfile>,
}

impl Default for ScoreMatrixBuilder {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl ScoreMatrixBuilder {
    pub fn new(sources: SourceConfig) -> Self {
        Self {
            sources,
            imputed_cutoff_pct: DEFAULT_IMPUTED_CUTOFF_PCT,
            profiles: Vec::new(),
        }
    }

    pub fn with_imputed_cutoff_pct(mut self, pct: f64) -> Self {
        self.imputed_cutoff_pct = pct;
        self
    }

    /// Release metadata used to place forecasters in the fixed-effects fit sample.
    pub fn with_profiles(mut self, profiles: Vec<ForecasterProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn build(
        &self,
        records: &[ForecastRecord],
        resolutions: &[ResolutionValue],
    ) -> Result<ScoreMatrix, ScoreMatrixError> {
        let span = brierboard_core::build_span!(records.len());
        let _guard = span.enter();

        let outcomes = Self::index_resolutions(resolutions);
        let mut report = ExclusionReport::default();
        let dropped = self.imputed_dropouts(records);
        report.imputed_dropped = dropped.keys().map(|&(id, due)| (id.clone(), due)).collect();
        let mut imputed_skipped = 0usize;

        // Latest on-time submission per (forecaster, question).
        let mut kept: BTreeMap<(&ForecasterId, &QuestionKey), &ForecastRecord> = BTreeMap::new();
        for record in records {
            if dropped.contains_key(&(&record.forecaster, record.question.forecast_due_date)) {
                imputed_skipped += 1;
                continue;
            }
            let p = record.predicted_probability;
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                warn!(
                    forecaster = %record.forecaster,
                    question = %record.question,
                    probability = p,
                    "malformed probability, excluded"
                );
                report.malformed_probability += 1;
                continue;
            }
            match outcomes.get(&record.question) {
                None => {
                    report.unresolved += 1;
                    continue;
                }
                Some(Outcome::Malformed) => {
                    report.malformed_resolution += 1;
                    continue;
                }
                Some(Outcome::Resolved(_)) => {}
            }
            if record.submission_date > record.question.forecast_due_date {
                report.late += 1;
                continue;
            }
            let slot = (&record.forecaster, &record.question);
            match kept.get(&slot) {
                Some(existing) if existing.submission_date > record.submission_date => {
                    report.superseded += 1;
                }
                Some(_) => {
                    report.superseded += 1;
                    kept.insert(slot, record);
                }
                None => {
                    kept.insert(slot, record);
                }
            }
        }

        if imputed_skipped > 0 {
            warn!(
                forecast_sets = report.imputed_dropped.len(),
                forecasts = imputed_skipped,
                "forecast sets dropped for imputed forecasts"
            );
        }

        if kept.is_empty() {
            return Err(ScoreMatrixError::Empty);
        }

        let mut forecaster_index: BTreeMap<&ForecasterId, &ForecastRecord> = BTreeMap::new();
        let mut question_index: BTreeMap<&QuestionKey, f64> = BTreeMap::new();
        for (&(forecaster, question), &record) in &kept {
            forecaster_index.entry(forecaster).or_insert(record);
            if let Some(Outcome::Resolved(v)) = outcomes.get(question) {
                question_index.insert(question, *v);
            }
        }

        let forecasters: Vec<Forecaster> = forecaster_index
            .iter()
            .map(|(id, first)| {
                Forecaster::new((*id).clone(), first.model_organization.clone())
                    .with_release_date(self.release_date_of(id))
            })
            .collect();
        let f_pos: HashMap<&ForecasterId, usize> = forecaster_index
            .keys()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let questions: Vec<ScoredQuestion> = question_index
            .iter()
            .map(|(key, value)| ScoredQuestion {
                key: (*key).clone(),
                question_type: self.sources.classify(&key.source, key.horizon),
                resolved_value: *value,
            })
            .collect();
        let q_pos: HashMap<&QuestionKey, usize> = question_index
            .keys()
            .enumerate()
            .map(|(i, key)| (*key, i))
            .collect();

        let cells: Vec<ScoreCell> = kept
            .iter()
            .map(|(&(forecaster, question), &record)| {
                let q = q_pos[question];
                let forecast = record.predicted_probability;
                let outcome = questions[q].resolved_value;
                ScoreCell {
                    forecaster: f_pos[forecaster],
                    question: q,
                    forecast,
                    brier: (forecast - outcome).powi(2),
                }
            })
            .collect();

        info!(
            forecasters = forecasters.len(),
            questions = questions.len(),
            cells = cells.len(),
            unresolved = report.unresolved,
            late = report.late,
            malformed = report.malformed_probability + report.malformed_resolution,
            "score matrix built"
        );

        Ok(ScoreMatrix::new(forecasters, questions, cells, report))
    }

    fn index_resolutions(resolutions: &[ResolutionValue]) -> HashMap<QuestionKey, Outcome> {
        let mut outcomes = HashMap::with_capacity(resolutions.len());
        for resolution in resolutions {
            let Some(value) = resolution.resolved_value else {
                continue;
            };
            let outcome = if value == 0.0 || value == 1.0 {
                Outcome::Resolved(value)
            } else {
                warn!(
                    question = %resolution.question,
                    value,
                    "resolution is not 0 or 1, question excluded"
                );
                Outcome::Malformed
            };
            outcomes.insert(resolution.question.clone(), outcome);
        }
        outcomes
    }

    /// Outside forecast sets, one per `(forecaster, forecast due date)`, whose imputed
    /// share exceeds the cutoff, with that share. Only the offending set is dropped.
    fn imputed_dropouts<'r>(
        &self,
        records: &'r [ForecastRecord],
    ) -> BTreeMap<(&'r ForecasterId, NaiveDate), f64> {
        let mut tallies: HashMap<(&'r ForecasterId, NaiveDate), (usize, usize)> = HashMap::new();
        for record in records.iter().filter(|r| !r.forecaster.is_benchmark()) {
            let entry = tallies
                .entry((&record.forecaster, record.question.forecast_due_date))
                .or_default();
            entry.0 += usize::from(record.imputed);
            entry.1 += 1;
        }
        tallies
            .into_iter()
            .filter_map(|((id, due), (imputed, total))| {
                let pct = imputed as f64 / total as f64 * 100.0;
                (pct > self.imputed_cutoff_pct).then(|| {
                    debug!(forecaster = %id, due = %due, imputed_pct = pct, "forecast set dropped for imputed forecasts");
                    ((id, due), pct)
                })
            })
            .collect()
    }

    fn release_date_of(&self, id: &ForecasterId) -> Option<NaiveDate> {
        self.profiles
            .iter()
            .filter(|p| p.matches(id))
            .find_map(|p| p.release_date)
    }
}
