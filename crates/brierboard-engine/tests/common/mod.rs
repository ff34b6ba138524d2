//! Deterministic run inputs shared by the integration tests.

#![allow(dead_code)]

use brierboard_core::config::{BrierboardConfig, SimulationConfig};
use brierboard_core::constants::{models, BENCHMARK_ORGANIZATION};
use brierboard_core::types::{
    ForecastRecord, ForecasterId, ForecasterProfile, QuestionKey, ResolutionValue,
};
use brierboard_engine::inputs::RunInputs;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DUE_DATES: [&str; 2] = ["2024-01-07", "2024-02-04"];
pub const PER_TYPE: usize = 6;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn as_of() -> NaiveDate {
    date("2024-12-31")
}

/// `PER_TYPE` dataset and market questions per due date, resolving 1, 0, 1, ...
pub fn questions() -> Vec<(QuestionKey, f64)> {
    let mut out = Vec::new();
    for due in DUE_DATES {
        for i in 0..PER_TYPE {
            let v = if i % 2 == 0 { 1.0 } else { 0.0 };
            out.push((QuestionKey::new(date(due), "acled", format!("d{i}"), Some(30)), v));
            out.push((QuestionKey::new(date(due), "manifold", format!("m{i}"), None), v));
        }
    }
    out
}

/// A forecaster that puts `skill` on the true outcome, with seeded noise.
pub fn skilled(id: ForecasterId, skill: f64, noise: f64, seed: u64) -> Vec<ForecastRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    questions()
        .into_iter()
        .map(|(q, v)| {
            let jitter = if noise > 0.0 { rng.gen_range(-noise..noise) } else { 0.0 };
            let p = (skill + jitter).clamp(0.0, 1.0);
            ForecastRecord {
                model_organization: id.organization.clone(),
                forecaster: id.clone(),
                submission_date: q.forecast_due_date,
                predicted_probability: if v == 1.0 { p } else { 1.0 - p },
                question: q,
                imputed: false,
            }
        })
        .collect()
}

pub fn benchmark(model: &str) -> ForecasterId {
    ForecasterId::benchmark(model)
}

pub fn inputs() -> RunInputs {
    let mut records = Vec::new();
    records.extend(skilled(benchmark(models::SUPERFORECASTER_MEDIAN), 0.85, 0.05, 1));
    records.extend(skilled(benchmark(models::NAIVE), 0.55, 0.05, 2));
    records.extend(skilled(benchmark("model-good"), 0.75, 0.1, 3));
    records.extend(skilled(benchmark("model-bad"), 0.45, 0.1, 4));
    records.extend(skilled(ForecasterId::new("Acme", "acme-1"), 0.7, 0.1, 5));
    records.extend(skilled(benchmark("model-good with news"), 0.8, 0.1, 6));

    let resolutions = questions()
        .into_iter()
        .map(|(question, v)| ResolutionValue {
            question,
            resolved_value: Some(v),
            resolution_date: None,
        })
        .collect();

    RunInputs {
        questions: questions().into_iter().map(|(q, _)| q).collect(),
        resolutions,
        records,
        profiles: vec![ForecasterProfile {
            organization: Some("Acme".into()),
            model: "acme-1".into(),
            release_date: Some(date("2023-11-01")),
        }],
    }
}

pub fn config(replicates: u32) -> BrierboardConfig {
    BrierboardConfig {
        simulation: SimulationConfig {
            replicates: Some(replicates),
            seed: Some(7),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn is_benchmark_org(id: &ForecasterId) -> bool {
    id.organization == BENCHMARK_ORGANIZATION
}
