//! Least-squares trend through the SOTA frontier.

use brierboard_core::constants::DAYS_PER_MONTH;
use tracing::debug;

use super::types::{SotaPoint, TrendModel};
use crate::stats::t_critical_95;

/// OLS of score on months since the first point. `None` with fewer than three points
/// or when every point shares a release date.
pub(crate) fn fit_trend(points: &[&SotaPoint]) -> Option<TrendModel> {
    let origin = points.iter().map(|p| p.release_date).min()?;
    let n = points.len();
    if n < 3 {
        return None;
    }
    let xs: Vec<f64> = points
        .iter()
        .map(|p| (p.release_date - origin).num_days() as f64 / DAYS_PER_MONTH)
        .collect();
    let ys: Vec<f64> = points.iter().map(|p| p.score).collect();
    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;
    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    if sxx <= 0.0 {
        debug!("degenerate trend: all points share a release date");
        return None;
    }
    let sxy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let sse: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
        .sum();
    let df = nf - 2.0;
    let residual_se = (sse / df).sqrt();
    let slope_se = residual_se / sxx.sqrt();
    let t_critical = t_critical_95(df);

    Some(TrendModel {
        origin,
        n_points: n,
        intercept,
        slope,
        slope_se,
        slope_ci: (slope - t_critical * slope_se, slope + t_critical * slope_se),
        t_critical,
        residual_se,
        mean_months: mean_x,
        mean_score: mean_y,
        sxx,
    })
}
