//! SOTA series, trend, and parity types.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use brierboard_core::constants::DAYS_PER_MONTH;

/// One model's overall score at its release date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SotaPoint {
    pub model: String,
    pub release_date: NaiveDate,
    pub score: f64,
}

impl SotaPoint {
    pub fn new(model: impl Into<String>, release_date: NaiveDate, score: f64) -> Self {
        Self {
            model: model.into(),
            release_date,
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPoint {
    #[serde(flatten)]
    pub point: SotaPoint,
    pub is_sota: bool,
}

/// OLS fit of SOTA score on months since the first SOTA release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub origin: NaiveDate,
    pub n_points: usize,
    pub intercept: f64,
    /// Score change per month.
    pub slope: f64,
    pub slope_se: f64,
    pub slope_ci: (f64, f64),
    pub t_critical: f64,
    pub residual_se: f64,
    pub mean_months: f64,
    pub mean_score: f64,
    pub sxx: f64,
}

impl TrendModel {
    pub fn months_since_origin(&self, date: NaiveDate) -> f64 {
        (date - self.origin).num_days() as f64 / DAYS_PER_MONTH
    }

    pub fn date_at(&self, months: f64) -> Option<NaiveDate> {
        let days = (months * DAYS_PER_MONTH).round();
        if !days.is_finite() || days.abs() > 1e7 {
            return None;
        }
        self.origin.checked_add_signed(Duration::days(days as i64))
    }

    pub fn predict(&self, date: NaiveDate) -> f64 {
        self.intercept + self.slope * self.months_since_origin(date)
    }

    /// Two-sided 95% band for the fitted mean at `date`.
    pub fn confidence_band(&self, date: NaiveDate) -> (f64, f64) {
        let x = self.months_since_origin(date);
        let fit = self.intercept + self.slope * x;
        let half = self.t_critical
            * self.residual_se
            * (1.0 / self.n_points as f64 + (x - self.mean_months).powi(2) / self.sxx).sqrt();
        (fit - half, fit + half)
    }
}

/// Projected date the SOTA trend reaches the human baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParityProjection {
    pub baseline_model: String,
    pub baseline_score: f64,
    pub date: NaiveDate,
    /// `None` on a side whose slope bound is not improving.
    pub ci_lower: Option<NaiveDate>,
    pub ci_upper: Option<NaiveDate>,
}

/// Why no parity date was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionReason {
    NoTrend,
    NoBaseline,
    NonImproving,
    AlreadyReached,
    BeyondHorizon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParityOutcome {
    Projected(ParityProjection),
    Suppressed { reason: SuppressionReason },
}

impl ParityOutcome {
    pub fn projection(&self) -> Option<&ParityProjection> {
        match self {
            ParityOutcome::Projected(p) => Some(p),
            ParityOutcome::Suppressed { .. } => None,
        }
    }
}

/// The `sota.json` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SotaReport {
    pub as_of: NaiveDate,
    pub points: Vec<AnnotatedPoint>,
    pub trend: Option<TrendModel>,
    pub parity: ParityOutcome,
}
