//! SOTA frontier over a release-ordered series.

use brierboard_core::constants::MIN_TREND_POINTS;
use tracing::debug;

use super::trend::fit_trend;
use super::types::{AnnotatedPoint, SotaPoint, TrendModel};

/// Flag the points that set a new best and fit a trend through them.
///
/// Points are ordered by release date, then model name. Within one release date only
/// the lowest score can be SOTA, and only if it beats the running best by more than
/// `tolerance`.
pub fn compute_sota_and_trend(
    points: &[SotaPoint],
    tolerance: f64,
) -> (Vec<AnnotatedPoint>, Option<TrendModel>) {
    let span = brierboard_core::sota_span!(points.len());
    let _guard = span.enter();

    let mut ordered: Vec<&SotaPoint> = points.iter().filter(|p| p.score.is_finite()).collect();
    ordered.sort_by(|a, b| {
        a.release_date
            .cmp(&b.release_date)
            .then_with(|| a.model.cmp(&b.model))
    });

    let mut annotated: Vec<AnnotatedPoint> = ordered
        .iter()
        .map(|p| AnnotatedPoint {
            point: (*p).clone(),
            is_sota: false,
        })
        .collect();

    let mut best = f64::INFINITY;
    let mut start = 0;
    while start < annotated.len() {
        let date = annotated[start].point.release_date;
        let end = annotated[start..]
            .iter()
            .position(|a| a.point.release_date != date)
            .map_or(annotated.len(), |n| start + n);

        // First minimum wins, so name order breaks score ties.
        let mut leader = start;
        for i in start + 1..end {
            if annotated[i].point.score < annotated[leader].point.score {
                leader = i;
            }
        }
        if annotated[leader].point.score < best - tolerance {
            best = annotated[leader].point.score;
            annotated[leader].is_sota = true;
        }
        start = end;
    }

    let frontier: Vec<&SotaPoint> = annotated
        .iter()
        .filter(|a| a.is_sota)
        .map(|a| &a.point)
        .collect();
    debug!(points = annotated.len(), sota = frontier.len(), "sota frontier");

    let trend = if frontier.len() >= MIN_TREND_POINTS {
        fit_trend(&frontier)
    } else {
        None
    };
    (annotated, trend)
}
