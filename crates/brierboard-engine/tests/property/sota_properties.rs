use brierboard_engine::sota::{
    compute_sota_and_trend, project_parity, ParityOutcome, SotaPoint, SuppressionReason,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn series() -> impl Strategy<Value = Vec<SotaPoint>> {
    prop::collection::vec((0i64..720, 0.05f64..0.4), 0..30).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (day, score))| {
                SotaPoint::new(format!("m{i:02}"), date("2023-01-01") + Duration::days(day), score)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn sota_flags_are_monotone(points in series(), tolerance in 0.0f64..0.02) {
        let (annotated, _) = compute_sota_and_trend(&points, tolerance);
        prop_assert_eq!(annotated.len(), points.len());

        let flagged: Vec<f64> = annotated.iter().filter(|a| a.is_sota).map(|a| a.point.score).collect();
        for w in flagged.windows(2) {
            prop_assert!(w[1] < w[0] - tolerance);
        }

        // Nothing beats the final frontier by more than the tolerance.
        if let Some(frontier) = flagged.last() {
            let min = points.iter().map(|p| p.score).fold(f64::INFINITY, f64::min);
            prop_assert!(*frontier <= min + tolerance);
        } else {
            prop_assert!(points.is_empty());
        }

        // Ordered by release date.
        for w in annotated.windows(2) {
            prop_assert!(w[0].point.release_date <= w[1].point.release_date);
        }
    }

    #[test]
    fn falling_frontier_projects_parity_after_as_of(
        start in 0.2f64..0.3,
        step in 0.005f64..0.02,
        n in 3usize..8,
    ) {
        let points: Vec<SotaPoint> = (0..n)
            .map(|i| SotaPoint::new(
                format!("m{i}"),
                date("2023-01-01") + Duration::days(60 * i as i64),
                start - step * i as f64,
            ))
            .collect();
        let (annotated, trend) = compute_sota_and_trend(&points, 0.0);
        prop_assert!(annotated.iter().all(|a| a.is_sota));
        let trend = trend.unwrap();
        prop_assert!(trend.slope < 0.0);

        let as_of = points[n - 1].release_date;
        let baseline = start - step * (n as f64 + 2.0);
        match project_parity(Some(&trend), Some(("humans", baseline)), as_of, 20) {
            ParityOutcome::Projected(p) => {
                prop_assert!(p.date > as_of);
                if let (Some(lo), Some(hi)) = (p.ci_lower, p.ci_upper) {
                    prop_assert!(lo <= p.date && p.date <= hi);
                }
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}

#[test]
fn later_lower_score_takes_the_frontier() {
    let points = vec![
        SotaPoint::new("A", date("2024-01-01"), 0.20),
        SotaPoint::new("B", date("2024-02-01"), 0.25),
        SotaPoint::new("C", date("2024-03-01"), 0.15),
    ];
    let (annotated, trend) = compute_sota_and_trend(&points, 0.0);
    let flags: Vec<(&str, bool)> = annotated
        .iter()
        .map(|a| (a.point.model.as_str(), a.is_sota))
        .collect();
    assert_eq!(flags, vec![("A", true), ("B", false), ("C", true)]);
    // Two SOTA points are not enough for a trend.
    assert!(trend.is_none());
}

#[test]
fn flat_or_rising_trend_suppresses_parity() {
    // Fit a real trend, then flatten or reverse its slope.
    let improving = vec![
        SotaPoint::new("a", date("2024-01-01"), 0.20),
        SotaPoint::new("b", date("2024-03-01"), 0.19),
        SotaPoint::new("c", date("2024-05-01"), 0.18),
    ];
    let (_, trend) = compute_sota_and_trend(&improving, 0.0);
    let mut trend = trend.unwrap();

    trend.slope = 0.0;
    let outcome = project_parity(Some(&trend), Some(("humans", 0.1)), date("2024-06-01"), 20);
    assert_eq!(
        outcome,
        ParityOutcome::Suppressed {
            reason: SuppressionReason::NonImproving
        }
    );

    trend.slope = 0.001;
    let outcome = project_parity(Some(&trend), Some(("humans", 0.1)), date("2024-06-01"), 20);
    assert!(outcome.projection().is_none());
}
