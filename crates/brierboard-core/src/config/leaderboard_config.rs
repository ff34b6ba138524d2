//! Leaderboard assembly configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMPUTED_CUTOFF_PCT, DEFAULT_INCLUSION_DELAY_DAYS, DEFAULT_MODEL_RELEASE_CUTOFF_DAYS};

/// How the overall score treats a forecaster with only one defined axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverallPolicy {
    /// Overall is undefined unless both axes are defined.
    #[default]
    RequireBoth,
    /// Overall takes the single defined axis.
    CarryForward,
}

impl std::str::FromStr for OverallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require_both" => Ok(Self::RequireBoth),
            "carry_forward" => Ok(Self::CarryForward),
            other => Err(format!("unknown overall policy: {other}")),
        }
    }
}

/// Configuration for the leaderboard assembler.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Days after a forecaster's first due date before it is published. Default: 100.
    pub inclusion_delay_days: Option<i64>,
    /// Overall score policy. Default: require_both.
    pub overall_policy: Option<OverallPolicy>,
    /// Max share of imputed forecasts (percent) for outside forecasters. Default: 5.0.
    pub imputed_cutoff_pct: Option<f64>,
    /// Release-age cutoff for the fixed-effects fit sample. Default: 365.
    pub model_release_cutoff_days: Option<i64>,
    /// Synthesize Always 0 / 0.5 / 1 and Random Uniform when missing. Default: true.
    pub synthesize_references: Option<bool>,
    /// Score the x% oracles for the "oracle equiv" column. Default: true.
    pub oracles: Option<bool>,
}

impl LeaderboardConfig {
    pub fn effective_inclusion_delay_days(&self) -> i64 {
        self.inclusion_delay_days.unwrap_or(DEFAULT_INCLUSION_DELAY_DAYS)
    }

    pub fn effective_overall_policy(&self) -> OverallPolicy {
        self.overall_policy.unwrap_or_default()
    }

    pub fn effective_imputed_cutoff_pct(&self) -> f64 {
        self.imputed_cutoff_pct.unwrap_or(DEFAULT_IMPUTED_CUTOFF_PCT)
    }

    pub fn effective_model_release_cutoff_days(&self) -> i64 {
        self.model_release_cutoff_days
            .unwrap_or(DEFAULT_MODEL_RELEASE_CUTOFF_DAYS)
    }

    pub fn effective_synthesize_references(&self) -> bool {
        self.synthesize_references.unwrap_or(true)
    }

    pub fn effective_oracles(&self) -> bool {
        self.oracles.unwrap_or(true)
    }
}
