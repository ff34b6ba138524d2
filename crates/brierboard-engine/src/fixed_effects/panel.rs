//! One question type's slice of the score matrix, shaped for the estimator.

use brierboard_core::constants::{models, DEFAULT_MODEL_RELEASE_CUTOFF_DAYS};
use brierboard_core::types::forecaster::is_oracle_name;
use brierboard_core::types::{Forecaster, QuestionKey, QuestionType};
use chrono::NaiveDate;

use crate::score_matrix::ScoreMatrix;

/// Which (forecaster, question) cells inform question difficulty.
///
/// Recent models (released fewer than `release_cutoff_days` before the due date) and
/// the benchmark's own non-trivial forecasters are in; trivial references and the
/// x% oracles never are.
#[derive(Debug, Clone, Copy)]
pub struct FitSample {
    pub release_cutoff_days: i64,
}

impl Default for FitSample {
    fn default() -> Self {
        Self {
            release_cutoff_days: DEFAULT_MODEL_RELEASE_CUTOFF_DAYS,
        }
    }
}

impl FitSample {
    pub fn includes(&self, forecaster: &Forecaster, due: NaiveDate) -> bool {
        let id = &forecaster.id;
        if is_oracle_name(&id.model) && id.is_benchmark() {
            return false;
        }
        let recent = forecaster
            .release_date
            .is_some_and(|released| (due - released).num_days() < self.release_cutoff_days);
        let benchmark = id.is_benchmark() && !models::EXCLUDED_FROM_FIT.contains(&id.model.as_str());
        recent || benchmark
    }
}

#[derive(Debug, Clone)]
pub struct PanelQuestion {
    /// Index into the score matrix's questions.
    pub matrix_index: usize,
    pub key: QuestionKey,
}

#[derive(Debug, Clone, Copy)]
pub struct PanelCell {
    /// Index into the score matrix's forecasters.
    pub forecaster: usize,
    /// Index into the panel's questions.
    pub question: usize,
    pub score: f64,
    pub in_fit: bool,
}

/// Cells of one question type. Forecaster indices stay global so results from the
/// two panels line up.
#[derive(Debug, Clone)]
pub struct Panel {
    pub question_type: QuestionType,
    pub n_forecasters: usize,
    pub questions: Vec<PanelQuestion>,
    pub cells: Vec<PanelCell>,
}

impl Panel {
    /// Slice `matrix` by type, keeping only forecasters accepted by `keep`.
    pub fn from_matrix(
        matrix: &ScoreMatrix,
        question_type: QuestionType,
        fit_sample: &FitSample,
        keep: impl Fn(&Forecaster) -> bool,
    ) -> Self {
        let mut local = vec![None; matrix.questions().len()];
        let mut questions = Vec::new();
        for (i, q) in matrix.questions().iter().enumerate() {
            if q.question_type == question_type {
                local[i] = Some(questions.len());
                questions.push(PanelQuestion {
                    matrix_index: i,
                    key: q.key.clone(),
                });
            }
        }

        let kept: Vec<bool> = matrix.forecasters().iter().map(&keep).collect();
        let cells = matrix
            .cells()
            .iter()
            .filter(|c| kept[c.forecaster])
            .filter_map(|c| {
                let question = local[c.question]?;
                let forecaster = &matrix.forecasters()[c.forecaster];
                Some(PanelCell {
                    forecaster: c.forecaster,
                    question,
                    score: c.brier,
                    in_fit: fit_sample.includes(forecaster, questions[question].key.forecast_due_date),
                })
            })
            .collect();

        Self {
            question_type,
            n_forecasters: matrix.forecasters().len(),
            questions,
            cells,
        }
    }

    pub fn n_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every question drawn once.
    pub fn unit_weights(&self) -> Vec<f64> {
        vec![1.0; self.questions.len()]
    }
}
