//! Leaderboard variants: which forecast sets feed each published table.

use serde::{Deserialize, Serialize};

use crate::constants::BENCHMARK_ORGANIZATION;
use crate::types::ForecasterId;

/// One leaderboard variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    /// Only these organizations are included. Empty means all.
    #[serde(default)]
    pub organizations: Vec<String>,
    /// Models whose name contains any of these are left out.
    #[serde(default)]
    pub exclude_model_substrings: Vec<String>,
}

impl VariantConfig {
    /// Benchmark-run models only, without the freeze-value and news ablations.
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            organizations: vec![BENCHMARK_ORGANIZATION.to_string()],
            exclude_model_substrings: vec![
                "with freeze values".to_string(),
                "with news".to_string(),
                "with SECOND news".to_string(),
            ],
        }
    }

    /// Every forecast set.
    pub fn tournament() -> Self {
        Self {
            name: "tournament".to_string(),
            organizations: Vec::new(),
            exclude_model_substrings: Vec::new(),
        }
    }

    pub fn includes(&self, id: &ForecasterId) -> bool {
        let org_ok = self.organizations.is_empty()
            || self.organizations.iter().any(|o| *o == id.organization);
        org_ok
            && !self
                .exclude_model_substrings
                .iter()
                .any(|s| id.model.contains(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_excludes_outside_orgs_and_ablations() {
        let v = VariantConfig::baseline();
        assert!(v.includes(&ForecasterId::benchmark("GPT-4o (zero shot)")));
        assert!(!v.includes(&ForecasterId::benchmark("GPT-4o (zero shot with news)")));
        assert!(!v.includes(&ForecasterId::benchmark("GPT-4o (scratchpad with freeze values)")));
        assert!(!v.includes(&ForecasterId::new("Acme", "model-x")));
    }

    #[test]
    fn test_tournament_includes_everything() {
        let v = VariantConfig::tournament();
        assert!(v.includes(&ForecasterId::new("Acme", "model-x with news")));
    }
}
