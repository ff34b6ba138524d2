//! Projected date the SOTA trend reaches a human baseline.

use chrono::{Months, NaiveDate};
use tracing::debug;

use super::types::{ParityOutcome, ParityProjection, SuppressionReason, TrendModel};

/// Solve the trend for the baseline score.
///
/// The point estimate solves `intercept + slope · months = baseline`, written through
/// the centroid `(mean_months, mean_score)` that every OLS line passes through. The
/// date interval re-solves at each slope CI bound with the line pivoted at that same
/// centroid, not at the intercept: the band is narrowest near the middle of the SOTA
/// series and widens with distance from it. A bound that is not improving leaves that
/// side of the interval open.
pub fn project_parity(
    trend: Option<&TrendModel>,
    baseline: Option<(&str, f64)>,
    as_of: NaiveDate,
    horizon_years: u32,
) -> ParityOutcome {
    let suppressed = |reason| {
        debug!(?reason, "parity projection suppressed");
        ParityOutcome::Suppressed { reason }
    };
    let Some(trend) = trend else {
        return suppressed(SuppressionReason::NoTrend);
    };
    let Some((baseline_model, baseline_score)) = baseline else {
        return suppressed(SuppressionReason::NoBaseline);
    };
    if trend.slope.is_nan() || trend.slope >= 0.0 {
        return suppressed(SuppressionReason::NonImproving);
    }

    let solve = |slope: f64| -> Option<NaiveDate> {
        (slope < 0.0)
            .then(|| trend.mean_months + (baseline_score - trend.mean_score) / slope)
            .and_then(|months| trend.date_at(months))
    };
    let Some(date) = solve(trend.slope) else {
        return suppressed(SuppressionReason::BeyondHorizon);
    };
    if date <= as_of {
        return suppressed(SuppressionReason::AlreadyReached);
    }
    let horizon = as_of.checked_add_months(Months::new(horizon_years.saturating_mul(12)));
    if horizon.map_or(true, |h| date > h) {
        return suppressed(SuppressionReason::BeyondHorizon);
    }

    let (ci_lower, ci_upper) = match (solve(trend.slope_ci.0), solve(trend.slope_ci.1)) {
        (Some(a), Some(b)) => (Some(a.min(b)), Some(a.max(b))),
        (steep, None) => (steep, None),
        (None, flat) => (None, flat),
    };

    ParityOutcome::Projected(ParityProjection {
        baseline_model: baseline_model.to_string(),
        baseline_score,
        date,
        ci_lower,
        ci_upper,
    })
}
