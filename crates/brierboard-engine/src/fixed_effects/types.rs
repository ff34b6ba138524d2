//! Fixed effects results.

use brierboard_core::types::QuestionKey;
use serde::{Deserialize, Serialize};

/// Fitted effects for one panel.
///
/// `grand_mean` is the weighted mean of fit-sample scores and question effects have
/// mean zero, which pins the otherwise free shift between the two effect sets.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEffectsModel {
    pub grand_mean: f64,
    /// Indexed by matrix forecaster; `None` outside the fit sample.
    pub forecaster_effect: Vec<Option<f64>>,
    /// Indexed by panel question; `None` for questions with zero weight.
    pub question_effect: Vec<Option<f64>>,
    pub iterations: u32,
    pub components: usize,
}

/// One row of the published question fixed-effects artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFixedEffect {
    #[serde(flatten)]
    pub question: QuestionKey,
    pub question_fixed_effect: f64,
}
