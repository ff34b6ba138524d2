//! Question source catalog.

use serde::{Deserialize, Serialize};

use crate::constants::sources;
use crate::types::QuestionType;

/// Which sources produce dataset questions and which produce market questions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    pub dataset: Vec<String>,
    pub market: Vec<String>,
}

impl SourceConfig {
    pub fn effective_dataset(&self) -> Vec<String> {
        if self.dataset.is_empty() {
            sources::DATASET.iter().map(|s| s.to_string()).collect()
        } else {
            self.dataset.clone()
        }
    }

    pub fn effective_market(&self) -> Vec<String> {
        if self.market.is_empty() {
            sources::MARKET.iter().map(|s| s.to_string()).collect()
        } else {
            self.market.clone()
        }
    }

    /// Classify with the effective catalog.
    pub fn classify(&self, source: &str, horizon: Option<u32>) -> QuestionType {
        QuestionType::classify(
            source,
            horizon,
            &self.effective_dataset(),
            &self.effective_market(),
        )
    }
}
