use brierboard_core::config::OverallPolicy;
use brierboard_core::constants::models;
use brierboard_core::types::{ForecastRecord, ForecasterId, QuestionKey, QuestionType, ResolutionValue};
use brierboard_engine::fixed_effects::{FitSample, FixedEffectsEstimator, Panel};
use brierboard_engine::score_matrix::{ScoreMatrix, ScoreMatrixBuilder};
use brierboard_engine::scoring::Scorer;
use brierboard_engine::simulation::RankStabilitySimulator;
use chrono::NaiveDate;
use proptest::prelude::*;

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 21).unwrap()
}

/// `per_type` dataset then `per_type` market questions, resolving 1, 0, 1, ...
fn question_keys(per_type: usize) -> Vec<(QuestionKey, f64)> {
    let dataset = (0..per_type).map(|i| QuestionKey::new(due(), "acled", format!("d{i}"), Some(30)));
    let market = (0..per_type).map(|i| QuestionKey::new(due(), "manifold", format!("m{i}"), None));
    dataset
        .chain(market)
        .enumerate()
        .map(|(i, q)| (q, if i % 2 == 0 { 1.0 } else { 0.0 }))
        .collect()
}

fn record(id: &ForecasterId, q: &QuestionKey, p: f64) -> ForecastRecord {
    ForecastRecord {
        forecaster: id.clone(),
        model_organization: id.organization.clone(),
        question: q.clone(),
        predicted_probability: p,
        submission_date: q.forecast_due_date,
        imputed: false,
    }
}

/// One benchmark model per row of `forecasts` plus Always 0.5 on every question.
fn matrix(per_type: usize, forecasts: &[Vec<f64>]) -> ScoreMatrix {
    let keys = question_keys(per_type);
    let half = ForecasterId::benchmark(models::ALWAYS_HALF);
    let mut records: Vec<ForecastRecord> = keys.iter().map(|(q, _)| record(&half, q, 0.5)).collect();
    for (i, row) in forecasts.iter().enumerate() {
        let id = ForecasterId::benchmark(format!("model-{i}"));
        records.extend(keys.iter().zip(row).map(|((q, _), p)| record(&id, q, *p)));
    }
    let resolutions: Vec<ResolutionValue> = keys
        .iter()
        .map(|(q, v)| ResolutionValue {
            question: q.clone(),
            resolved_value: Some(*v),
            resolution_date: None,
        })
        .collect();
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

fn forecasts(per_type: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(0.0f64..=1.0, per_type * 2), 2..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn always_half_scores_exactly_quarter(rows in forecasts(4)) {
        let m = matrix(4, &rows);
        let run = scorer(&m).score_observed().unwrap();
        let half = m.index_of(&ForecasterId::benchmark(models::ALWAYS_HALF)).unwrap();
        prop_assert_eq!(run.scores[half].dataset, Some(0.25));
        prop_assert_eq!(run.scores[half].market, Some(0.25));
        prop_assert_eq!(run.scores[half].overall, Some(0.25));
    }

    #[test]
    fn overall_is_mean_of_axes(rows in forecasts(3)) {
        let m = matrix(3, &rows);
        let run = scorer(&m).score_observed().unwrap();
        for s in &run.scores {
            let (d, mk) = (s.dataset.unwrap(), s.market.unwrap());
            prop_assert!((s.overall.unwrap() - (d + mk) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn identical_forecasters_have_no_skill_effect(
        probs in prop::collection::vec(0.0f64..=1.0, 8),
        n in 2usize..5,
    ) {
        let rows = vec![probs; n];
        let m = matrix(4, &rows);
        let panel = Panel::from_matrix(&m, QuestionType::Dataset, &FitSample::default(), |f| {
            f.id.model != models::ALWAYS_HALF
        });
        let model = FixedEffectsEstimator::default()
            .fit(&panel, &panel.unit_weights())
            .unwrap();

        let per_question: Vec<f64> = (0..panel.n_questions())
            .map(|q| panel.cells.iter().find(|c| c.question == q).unwrap().score)
            .collect();
        let mu = per_question.iter().sum::<f64>() / per_question.len() as f64;
        prop_assert!((model.grand_mean - mu).abs() < 1e-9);
        for (q, s) in per_question.iter().enumerate() {
            prop_assert!((model.question_effect[q].unwrap() - (s - mu)).abs() < 1e-8);
        }
        for alpha in model.forecaster_effect.iter().flatten() {
            prop_assert!(alpha.abs() < 1e-8);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn dominating_forecaster_always_ranks_first(rows in prop::collection::vec(
        prop::collection::vec(0.05f64..0.95, 10),
        1..4,
    )) {
        // model-0 forecasts every outcome exactly.
        let keys = question_keys(5);
        let mut all = vec![keys.iter().map(|(_, v)| *v).collect::<Vec<f64>>()];
        all.extend(rows);
        let m = matrix(5, &all);
        let s = scorer(&m);
        let observed = s.score_observed().unwrap().scores;
        let summary = RankStabilitySimulator::new(40, 3).run(&s, &observed).unwrap();

        let ace = m.index_of(&ForecasterId::benchmark("model-0")).unwrap();
        prop_assert_eq!(summary.best, Some(ace));
        prop_assert_eq!(summary.replicates_valid, 40);
        let ace_stats = &summary.forecasters[ace];
        prop_assert_eq!(ace_stats.pct_first, Some(100.0));
        prop_assert_eq!(ace_stats.pct_top5, Some(100.0));
        prop_assert_eq!(ace_stats.p_value, None);
        for (i, f) in summary.forecasters.iter().enumerate() {
            if i != ace {
                prop_assert_eq!(f.p_value, Some(0.0));
                prop_assert_eq!(f.pct_first, Some(0.0));
            }
        }
    }
}

#[test]
fn exchangeable_forecasters_have_p_value_near_half() {
    let per_type = 40;
    let keys = question_keys(per_type);
    let mut a = Vec::new();
    let mut b = Vec::new();
    for (i, (_, v)) in keys.iter().enumerate() {
        let j = (i % per_type / 2) as f64;
        let good = 0.9 - 0.005 * j;
        let bad = 0.5 + 0.004 * j;
        // Mirror image: A is sharp where B is vague and the other way round.
        let (pa, pb) = if i % 2 == 0 { (good, bad) } else { (bad, good) };
        // Distance from the outcome, as a forecast.
        let toward = |p: f64| if *v == 1.0 { p } else { 1.0 - p };
        a.push(toward(pa));
        b.push(toward(pb));
    }
    let m = matrix(per_type, &[a, b]);
    let s = scorer(&m);
    let observed = s.score_observed().unwrap().scores;
    let summary = RankStabilitySimulator::new(400, 11).run(&s, &observed).unwrap();

    let best = summary.best.unwrap();
    let other = ["model-0", "model-1"]
        .iter()
        .filter_map(|name| m.index_of(&ForecasterId::benchmark(*name)))
        .find(|i| *i != best)
        .unwrap();
    let p = summary.forecasters[other].p_value.unwrap();
    assert!((0.3..=0.7).contains(&p), "p-value {p}");
}
