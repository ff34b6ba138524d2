//! x% oracles: forecast `x` on questions that resolved 1 and `1 - x` on those that
//! resolved 0. A row's oracle equivalent is the most accurate oracle it matches.

use std::collections::{BTreeSet, HashMap};

use brierboard_core::constants::BENCHMARK_ORGANIZATION;
use brierboard_core::types::{ForecastRecord, ForecasterId, QuestionKey, ResolutionValue};

/// Oracles run from 0% to 100% in half-percent steps.
pub const ORACLE_STEPS: u32 = 200;

/// Accuracy of oracle `step`, in `[0, 1]`.
pub fn oracle_accuracy(step: u32) -> f64 {
    f64::from(step) / f64::from(ORACLE_STEPS)
}

pub fn oracle_id(step: u32) -> ForecasterId {
    ForecasterId::benchmark(format!("{:.1}% forecaster", oracle_accuracy(step) * 100.0))
}

/// Oracle forecasts on every question in `questions` that resolved exactly 0 or 1.
pub fn oracle_records(
    questions: &BTreeSet<QuestionKey>,
    resolutions: &[ResolutionValue],
) -> Vec<ForecastRecord> {
    let resolved: HashMap<&QuestionKey, f64> = resolutions
        .iter()
        .filter_map(|r| match r.resolved_value {
            Some(v) if v == 0.0 || v == 1.0 => Some((&r.question, v)),
            _ => None,
        })
        .collect();
    let targets: Vec<(&QuestionKey, f64)> = questions
        .iter()
        .filter_map(|q| resolved.get(q).map(|v| (q, *v)))
        .collect();

    (0..=ORACLE_STEPS)
        .flat_map(|step| {
            let x = oracle_accuracy(step);
            let id = oracle_id(step);
            targets.iter().map(move |(q, v)| ForecastRecord {
                forecaster: id.clone(),
                model_organization: BENCHMARK_ORGANIZATION.to_string(),
                question: (*q).clone(),
                predicted_probability: if *v == 1.0 { x } else { 1.0 - x },
                submission_date: q.forecast_due_date,
                imputed: false,
            })
        })
        .collect()
}

/// Largest oracle accuracy whose overall score the row matches or beats, rounded up
/// to the whole percent. `oracle_scores[step]` is that oracle's overall score.
pub fn oracle_equivalent(overall: Option<f64>, oracle_scores: &[Option<f64>]) -> Option<f64> {
    let overall = overall?;
    let step = oracle_scores
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_some_and(|s| overall <= s))
        .map(|(step, _)| step as u32)
        .max()?;
    // Half-percent steps: ceil(step / 2) whole percent.
    Some(f64::from(step.div_ceil(2)) / 100.0)
}
