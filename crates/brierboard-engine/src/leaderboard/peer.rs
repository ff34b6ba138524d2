//! Unadjusted comparison scores: peer score and Brier skill against the Naive
//! Forecaster. Higher is better for both.

use brierboard_core::config::OverallPolicy;
use brierboard_core::constants::models;
use brierboard_core::types::{Forecaster, ForecasterId, QuestionType};

use crate::score_matrix::ScoreMatrix;
use crate::scoring::AxisScores;

#[derive(Default, Clone, Copy)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn add(&mut self, v: f64) {
        self.sum += v;
        self.n += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// Peer and BSS scores per matrix forecaster. Forecasters rejected by `keep` get
/// undefined scores and do not contribute to question means.
pub fn peer_and_bss(
    matrix: &ScoreMatrix,
    policy: OverallPolicy,
    keep: impl Fn(&Forecaster) -> bool,
) -> Vec<(AxisScores, AxisScores)> {
    let nf = matrix.forecasters().len();
    let nq = matrix.questions().len();
    let kept: Vec<bool> = matrix.forecasters().iter().map(&keep).collect();

    let mut question_mean = vec![Mean::default(); nq];
    for cell in matrix.cells().iter().filter(|c| kept[c.forecaster]) {
        question_mean[cell.question].add(cell.brier);
    }

    let naive = matrix
        .index_of(&ForecasterId::benchmark(models::NAIVE))
        .filter(|i| kept[*i]);
    let mut naive_brier: Vec<Option<f64>> = vec![None; nq];
    if let Some(n) = naive {
        for cell in matrix.cells().iter().filter(|c| c.forecaster == n) {
            naive_brier[cell.question] = Some(cell.brier);
        }
    }

    // [forecaster][type]
    let mut peer = vec![[Mean::default(); 2]; nf];
    let mut bss = vec![[Mean::default(); 2]; nf];
    for cell in matrix.cells().iter().filter(|c| kept[c.forecaster]) {
        let t = type_slot(matrix.questions()[cell.question].question_type);
        if let Some(mean) = question_mean[cell.question].value() {
            peer[cell.forecaster][t].add(mean - cell.brier);
        }
        if let Some(nb) = naive_brier[cell.question] {
            bss[cell.forecaster][t].add(nb - cell.brier);
        }
    }

    (0..nf)
        .map(|f| {
            let axes = |m: &[Mean; 2]| AxisScores::new(m[0].value(), m[1].value(), policy);
            (axes(&peer[f]), axes(&bss[f]))
        })
        .collect()
}

fn type_slot(question_type: QuestionType) -> usize {
    match question_type {
        QuestionType::Dataset => 0,
        QuestionType::Market => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_matrix::ScoreMatrixBuilder;
    use brierboard_core::types::forecaster::is_oracle_name;
    use brierboard_core::types::{ForecastRecord, QuestionKey, ResolutionValue};
    use chrono::NaiveDate;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 21).unwrap()
    }

    fn record(id: ForecasterId, q: &str, p: f64) -> ForecastRecord {
        ForecastRecord {
            model_organization: id.organization.clone(),
            forecaster: id,
            question: QuestionKey::new(due(), "manifold", q, None),
            predicted_probability: p,
            submission_date: due(),
            imputed: false,
        }
    }

    fn resolution(q: &str, v: f64) -> ResolutionValue {
        ResolutionValue {
            question: QuestionKey::new(due(), "manifold", q, None),
            resolved_value: Some(v),
            resolution_date: None,
        }
    }

    #[test]
    fn test_peer_is_mean_minus_own() {
        let a = ForecasterId::new("A", "a");
        let b = ForecasterId::new("B", "b");
        let records = vec![record(a.clone(), "q1", 1.0), record(b.clone(), "q1", 0.0)];
        let matrix = ScoreMatrixBuilder::default()
            .build(&records, &[resolution("q1", 1.0)])
            .unwrap();
        let scores = peer_and_bss(&matrix, OverallPolicy::CarryForward, |_| true);

        let ia = matrix.index_of(&a).unwrap();
        let ib = matrix.index_of(&b).unwrap();
        // Briers 0 and 1, mean 0.5.
        assert_eq!(scores[ia].0.market, Some(0.5));
        assert_eq!(scores[ib].0.market, Some(-0.5));
        assert_eq!(scores[ia].0.overall, Some(0.5));
        assert_eq!(scores[ia].0.dataset, None);
        // No Naive Forecaster, no BSS.
        assert_eq!(scores[ia].1.market, None);
    }

    #[test]
    fn test_bss_against_naive_and_excluded_rows() {
        let naive = ForecasterId::benchmark(models::NAIVE);
        let a = ForecasterId::new("A", "a");
        let oracle = ForecasterId::benchmark("50.0% forecaster");
        let records = vec![
            record(naive.clone(), "q1", 0.5),
            record(a.clone(), "q1", 0.9),
            record(a.clone(), "q2", 0.9),
            record(oracle.clone(), "q1", 0.5),
        ];
        let res = vec![resolution("q1", 1.0), resolution("q2", 1.0)];
        let matrix = ScoreMatrixBuilder::default().build(&records, &res).unwrap();
        let scores = peer_and_bss(&matrix, OverallPolicy::RequireBoth, |f| {
            !is_oracle_name(&f.id.model)
        });

        let ia = matrix.index_of(&a).unwrap();
        let bss = scores[ia].1.market.unwrap();
        assert!((bss - (0.25 - 0.01)).abs() < 1e-12);
        assert_eq!(scores[ia].1.overall, None);

        let io = matrix.index_of(&oracle).unwrap();
        assert_eq!(scores[io].0, AxisScores::default());
    }
}
