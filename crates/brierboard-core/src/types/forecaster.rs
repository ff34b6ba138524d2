//! Forecaster identity.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{models, BENCHMARK_ORGANIZATION};

/// `(organization, model)`: the team that submitted and the system that forecast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForecasterId {
    pub organization: String,
    pub model: String,
}

impl ForecasterId {
    pub fn new(organization: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            model: model.into(),
        }
    }

    /// A forecaster owned by the benchmark itself.
    pub fn benchmark(model: impl Into<String>) -> Self {
        Self::new(BENCHMARK_ORGANIZATION, model)
    }

    /// Primary key: `{organization}_{model}`.
    pub fn primary_key(&self) -> String {
        format!("{}_{}", self.organization, self.model)
    }

    pub fn is_benchmark(&self) -> bool {
        self.organization == BENCHMARK_ORGANIZATION
    }

    pub fn is(&self, organization: &str, model: &str) -> bool {
        self.organization == organization && self.model == model
    }
}

impl fmt::Display for ForecasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.organization, self.model)
    }
}

/// What kind of row a forecaster produces. Only affects display highlighting and
/// whether the forecaster informs question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecasterKind {
    Model,
    Human,
    Reference,
}

impl ForecasterKind {
    /// Infer the kind from the benchmark's naming conventions.
    pub fn infer(id: &ForecasterId) -> Self {
        if !id.is_benchmark() {
            return ForecasterKind::Model;
        }
        let model = id.model.as_str();
        if models::HUMAN_BASELINES.contains(&model) {
            ForecasterKind::Human
        } else if models::EXCLUDED_FROM_FIT.contains(&model)
            || model == models::NAIVE
            || is_oracle_name(model)
        {
            ForecasterKind::Reference
        } else {
            ForecasterKind::Model
        }
    }
}

/// x% oracles are named `"{pct}% forecaster"`.
pub fn is_oracle_name(model: &str) -> bool {
    model
        .strip_suffix("% forecaster")
        .is_some_and(|pct| pct.parse::<f64>().is_ok())
}

/// A forecaster with the metadata the pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecaster {
    pub id: ForecasterId,
    pub model_organization: String,
    pub release_date: Option<NaiveDate>,
    pub kind: ForecasterKind,
}

impl Forecaster {
    pub fn new(id: ForecasterId, model_organization: impl Into<String>) -> Self {
        let kind = ForecasterKind::infer(&id);
        Self {
            id,
            model_organization: model_organization.into(),
            release_date: None,
            kind,
        }
    }

    pub fn with_release_date(mut self, release_date: Option<NaiveDate>) -> Self {
        self.release_date = release_date;
        self
    }

    /// Human rows are highlighted in published tables.
    pub fn is_highlighted(&self) -> bool {
        self.kind == ForecasterKind::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference() {
        assert_eq!(
            ForecasterKind::infer(&ForecasterId::new("OpenAI", "gpt-4o")),
            ForecasterKind::Model
        );
        assert_eq!(
            ForecasterKind::infer(&ForecasterId::benchmark(models::SUPERFORECASTER_MEDIAN)),
            ForecasterKind::Human
        );
        assert_eq!(
            ForecasterKind::infer(&ForecasterId::benchmark(models::NAIVE)),
            ForecasterKind::Reference
        );
        assert_eq!(
            ForecasterKind::infer(&ForecasterId::benchmark("37.5% forecaster")),
            ForecasterKind::Reference
        );
        assert_eq!(
            ForecasterKind::infer(&ForecasterId::benchmark("Claude-3.5 (zero shot)")),
            ForecasterKind::Model
        );
    }

    #[test]
    fn test_primary_key() {
        let id = ForecasterId::new("Anthropic", "claude");
        assert_eq!(id.primary_key(), "Anthropic_claude");
    }
}
