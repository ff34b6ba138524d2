//! Reference forecasters synthesized by the benchmark when the inputs lack them.

use std::collections::{BTreeSet, HashSet};

use brierboard_core::constants::{models, BENCHMARK_ORGANIZATION};
use brierboard_core::types::forecaster::is_oracle_name;
use brierboard_core::types::{ForecastRecord, ForecasterId, QuestionKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Constant forecasters and the seeded uniform forecaster.
pub const SYNTHESIZED: &[&str] = &[
    models::ALWAYS_0,
    models::ALWAYS_HALF,
    models::ALWAYS_1,
    models::RANDOM_UNIFORM,
];

fn is_synthesized(id: &ForecasterId) -> bool {
    id.is_benchmark() && SYNTHESIZED.contains(&id.model.as_str())
}

/// Questions answered by at least one real forecaster, restricted to the published
/// question set when one is given.
pub fn answered_questions(records: &[ForecastRecord], published: &[QuestionKey]) -> BTreeSet<QuestionKey> {
    let mut answered: BTreeSet<QuestionKey> = records
        .iter()
        .filter(|r| !is_synthesized(&r.forecaster) && !is_oracle_name(&r.forecaster.model))
        .map(|r| r.question.clone())
        .collect();
    if !published.is_empty() {
        let published: HashSet<&QuestionKey> = published.iter().collect();
        let before = answered.len();
        answered.retain(|q| published.contains(q));
        if answered.len() < before {
            warn!(
                dropped = before - answered.len(),
                "forecasts reference questions outside the published question sets"
            );
        }
    }
    answered
}

/// Forecasts for every reference forecaster missing from `records`, one per question.
pub fn synthesize_references(
    records: &[ForecastRecord],
    questions: &BTreeSet<QuestionKey>,
    seed: u64,
) -> Vec<ForecastRecord> {
    let present: HashSet<&str> = records
        .iter()
        .filter(|r| is_synthesized(&r.forecaster))
        .map(|r| r.forecaster.model.as_str())
        .collect();

    let mut out = Vec::new();
    for model in SYNTHESIZED.iter().filter(|m| !present.contains(*m)) {
        debug!(model, questions = questions.len(), "synthesizing reference forecaster");
        let mut rng = StdRng::seed_from_u64(seed);
        out.extend(questions.iter().map(|q| {
            let p = match *model {
                models::ALWAYS_0 => 0.0,
                models::ALWAYS_1 => 1.0,
                models::ALWAYS_HALF => 0.5,
                _ => rng.gen::<f64>(),
            };
            ForecastRecord {
                forecaster: ForecasterId::benchmark(*model),
                model_organization: BENCHMARK_ORGANIZATION.to_string(),
                question: q.clone(),
                predicted_probability: p,
                submission_date: q.forecast_due_date,
                imputed: false,
            }
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(id: &str) -> QuestionKey {
        QuestionKey::new(NaiveDate::from_ymd_opt(2024, 7, 21).unwrap(), "acled", id, Some(30))
    }

    fn record(model: &str, q: &QuestionKey) -> ForecastRecord {
        ForecastRecord {
            forecaster: ForecasterId::new("Acme", model),
            model_organization: "Acme".into(),
            question: q.clone(),
            predicted_probability: 0.3,
            submission_date: q.forecast_due_date,
            imputed: false,
        }
    }

    #[test]
    fn test_synthesizes_missing_references_only() {
        let q = key("1");
        let mut records = vec![record("m", &q)];
        records.push(ForecastRecord {
            forecaster: ForecasterId::benchmark(models::ALWAYS_HALF),
            ..record("x", &q)
        });
        let questions = answered_questions(&records, &[]);
        let synth = synthesize_references(&records, &questions, 7);

        let names: BTreeSet<&str> = synth.iter().map(|r| r.forecaster.model.as_str()).collect();
        assert!(!names.contains(models::ALWAYS_HALF));
        assert!(names.contains(models::ALWAYS_0));
        assert!(names.contains(models::RANDOM_UNIFORM));
        assert_eq!(synth.len(), 3);
    }

    #[test]
    fn test_random_uniform_is_seeded() {
        let qs: Vec<QuestionKey> = (0..5).map(|i| key(&i.to_string())).collect();
        let records: Vec<_> = qs.iter().map(|q| record("m", q)).collect();
        let questions = answered_questions(&records, &[]);
        let a = synthesize_references(&records, &questions, 11);
        let b = synthesize_references(&records, &questions, 11);
        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.predicted_probability)));
    }

    #[test]
    fn test_published_set_restricts_questions() {
        let records = vec![record("m", &key("1")), record("m", &key("2"))];
        let questions = answered_questions(&records, &[key("2")]);
        assert_eq!(questions.len(), 1);
        assert!(questions.contains(&key("2")));
    }
}
