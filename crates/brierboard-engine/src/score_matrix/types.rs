//! Score matrix types.

use std::collections::HashMap;

use brierboard_core::types::{Forecaster, ForecasterId, QuestionKey, QuestionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A resolved question that at least one forecaster answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredQuestion {
    pub key: QuestionKey,
    pub question_type: QuestionType,
    /// Exactly 0.0 or 1.0.
    pub resolved_value: f64,
}

/// One scored forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCell {
    pub forecaster: usize,
    pub question: usize,
    pub forecast: f64,
    pub brier: f64,
}

/// Scoreable question counts for one forecaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub dataset: usize,
    pub market: usize,
}

impl TypeCounts {
    pub fn get(&self, question_type: QuestionType) -> usize {
        match question_type {
            QuestionType::Dataset => self.dataset,
            QuestionType::Market => self.market,
        }
    }

    pub fn increment(&mut self, question_type: QuestionType) {
        match question_type {
            QuestionType::Dataset => self.dataset += 1,
            QuestionType::Market => self.market += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.dataset + self.market
    }
}

/// What the builder left out, and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExclusionReport {
    /// Forecasts on questions with no resolution or a null one.
    pub unresolved: usize,
    /// Forecasts submitted after the question's due date.
    pub late: usize,
    /// Probabilities outside [0, 1] or not finite.
    pub malformed_probability: usize,
    /// Forecasts on questions whose resolution was neither 0 nor 1.
    pub malformed_resolution: usize,
    /// Earlier submissions superseded by a later on-time one.
    pub superseded: usize,
    /// Forecast sets, as `(forecaster, forecast due date)`, dropped for too many
    /// imputed forecasts.
    pub imputed_dropped: Vec<(ForecasterId, NaiveDate)>,
}

/// Sparse score matrix. Every cell's question has a 0/1 resolution.
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    pub(crate) forecasters: Vec<Forecaster>,
    pub(crate) questions: Vec<ScoredQuestion>,
    pub(crate) cells: Vec<ScoreCell>,
    pub(crate) counts: Vec<TypeCounts>,
    pub(crate) exclusions: ExclusionReport,
    pub(crate) index: HashMap<ForecasterId, usize>,
}

impl ScoreMatrix {
    pub(crate) fn new(
        forecasters: Vec<Forecaster>,
        questions: Vec<ScoredQuestion>,
        cells: Vec<ScoreCell>,
        exclusions: ExclusionReport,
    ) -> Self {
        let mut counts = vec![TypeCounts::default(); forecasters.len()];
        for cell in &cells {
            counts[cell.forecaster].increment(questions[cell.question].question_type);
        }
        let index = forecasters
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self {
            forecasters,
            questions,
            cells,
            counts,
            exclusions,
            index,
        }
    }

    pub fn forecasters(&self) -> &[Forecaster] {
        &self.forecasters
    }

    pub fn questions(&self) -> &[ScoredQuestion] {
        &self.questions
    }

    pub fn cells(&self) -> &[ScoreCell] {
        &self.cells
    }

    pub fn exclusions(&self) -> &ExclusionReport {
        &self.exclusions
    }

    pub fn index_of(&self, id: &ForecasterId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn counts(&self, forecaster: usize) -> TypeCounts {
        self.counts.get(forecaster).copied().unwrap_or_default()
    }

    /// Sample size for one forecaster and type. `None` when the forecaster has no
    /// scoreable question of that type.
    pub fn sample_size(&self, forecaster: usize, question_type: QuestionType) -> Option<usize> {
        Some(self.counts(forecaster).get(question_type)).filter(|n| *n > 0)
    }

    pub fn question_count(&self, question_type: QuestionType) -> usize {
        self.questions
            .iter()
            .filter(|q| q.question_type == question_type)
            .count()
    }

    /// Raw mean Brier score per forecaster and type, unweighted.
    pub fn mean_brier(&self, forecaster: usize, question_type: QuestionType) -> Option<f64> {
        let (sum, n) = self
            .cells
            .iter()
            .filter(|c| {
                c.forecaster == forecaster
                    && self.questions[c.question].question_type == question_type
            })
            .fold((0.0, 0usize), |(s, n), c| (s + c.brier, n + 1));
        (n > 0).then(|| sum / n as f64)
    }
}
