use criterion::{criterion_group, criterion_main, Criterion};

use brierboard_core::config::OverallPolicy;
use brierboard_core::constants::models;
use brierboard_core::types::{ForecastRecord, ForecasterId, QuestionKey, ResolutionValue};
use brierboard_engine::fixed_effects::{FitSample, FixedEffectsEstimator};
use brierboard_engine::score_matrix::{ScoreMatrix, ScoreMatrixBuilder};
use brierboard_engine::scoring::Scorer;
use brierboard_engine::simulation::RankStabilitySimulator;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 40 forecasters over 8 due dates of 50 dataset and 25 market questions, ~85% coverage.
fn build_matrix() -> ScoreMatrix {
    let mut rng = StdRng::seed_from_u64(42);
    let first = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    let mut keys = Vec::new();
    for week in 0..8 {
        let due = first + Duration::days(14 * week);
        for i in 0..50 {
            keys.push(QuestionKey::new(due, "fred", format!("d{i}"), Some(30)));
        }
        for i in 0..25 {
            keys.push(QuestionKey::new(due, "polymarket", format!("m{i}"), None));
        }
    }
    let resolutions: Vec<ResolutionValue> = keys
        .iter()
        .map(|q| ResolutionValue {
            question: q.clone(),
            resolved_value: Some(if rng.gen_bool(0.4) { 1.0 } else { 0.0 }),
            resolution_date: None,
        })
        .collect();

    let mut ids: Vec<ForecasterId> = (0..40)
        .map(|i| ForecasterId::benchmark(format!("model-{i}")))
        .collect();
    ids.push(ForecasterId::benchmark(models::ALWAYS_HALF));

    let mut records = Vec::new();
    for id in &ids {
        for q in &keys {
            let half = id.model == models::ALWAYS_HALF;
            if !half && rng.gen_bool(0.15) {
                continue;
            }
            records.push(ForecastRecord {
                forecaster: id.clone(),
                model_organization: id.organization.clone(),
                question: q.clone(),
                predicted_probability: if half { 0.5 } else { rng.gen::<f64>() },
                submission_date: q.forecast_due_date,
                imputed: false,
            });
        }
    }
    ScoreMatrixBuilder::default().build(&records, &resolutions).unwrap()
}

fn scorer(matrix: &ScoreMatrix) -> Scorer {
    Scorer::from_matrix(
        matrix,
        &FitSample::default(),
        FixedEffectsEstimator::default(),
        OverallPolicy::RequireBoth,
        |_| true,
    )
}

fn bench_fixed_effects_fit(c: &mut Criterion) {
    let matrix = build_matrix();
    let scorer = scorer(&matrix);

    c.bench_function("fixed_effects_observed_41x600", |b| {
        b.iter(|| scorer.score_observed().unwrap());
    });
}

fn bench_simulation(c: &mut Criterion) {
    let matrix = build_matrix();
    let scorer = scorer(&matrix);
    let observed = scorer.score_observed().unwrap().scores;
    let simulator = RankStabilitySimulator::new(100, 7);

    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);
    group.bench_function("replicates_100", |b| {
        b.iter(|| simulator.run(&scorer, &observed).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_fixed_effects_fit, bench_simulation);
criterion_main!(benches);
