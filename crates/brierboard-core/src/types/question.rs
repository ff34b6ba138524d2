//! Question identity and type.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of a question inside one question-set release.
///
/// `(source, id)` is unique within a release; the due date ties it to the release and the
/// horizon distinguishes the per-horizon copies of dataset questions. Market questions
/// have no horizon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionKey {
    pub forecast_due_date: NaiveDate,
    pub source: String,
    pub id: String,
    #[serde(default)]
    pub horizon: Option<u32>,
}

/// Question-set metadata as published upstream. Same shape as the key.
pub type QuestionMeta = QuestionKey;

impl QuestionKey {
    pub fn new(
        forecast_due_date: NaiveDate,
        source: impl Into<String>,
        id: impl Into<String>,
        horizon: Option<u32>,
    ) -> Self {
        Self {
            forecast_due_date,
            source: source.into(),
            id: id.into(),
            horizon,
        }
    }

    /// Primary key: `{due}_{source}_{id}_{horizon}`, or `{due}_{source}_{id}` without a horizon.
    pub fn primary_key(&self) -> String {
        match self.horizon {
            Some(h) => format!("{}_{}_{}_{}", self.forecast_due_date, self.source, self.id, h),
            None => format!("{}_{}_{}", self.forecast_due_date, self.source, self.id),
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary_key())
    }
}

/// The two question populations scored separately and then equal-weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Dataset,
    Market,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [QuestionType::Dataset, QuestionType::Market];

    /// Classify a question by its source, falling back to the horizon for unknown
    /// sources (market questions carry no horizon).
    pub fn classify<S: AsRef<str>>(
        source: &str,
        horizon: Option<u32>,
        dataset_sources: &[S],
        market_sources: &[S],
    ) -> Self {
        if dataset_sources.iter().any(|s| s.as_ref() == source) {
            QuestionType::Dataset
        } else if market_sources.iter().any(|s| s.as_ref() == source) {
            QuestionType::Market
        } else if horizon.is_some() {
            QuestionType::Dataset
        } else {
            QuestionType::Market
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuestionType::Dataset => "dataset",
            QuestionType::Market => "market",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::sources;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_primary_key_with_and_without_horizon() {
        let dataset = QuestionKey::new(date("2024-07-21"), "acled", "q1", Some(30));
        let market = QuestionKey::new(date("2024-07-21"), "manifold", "m1", None);
        assert_eq!(dataset.primary_key(), "2024-07-21_acled_q1_30");
        assert_eq!(market.primary_key(), "2024-07-21_manifold_m1");
    }

    #[test]
    fn test_classify_known_and_unknown_sources() {
        assert_eq!(
            QuestionType::classify("fred", Some(7), sources::DATASET, sources::MARKET),
            QuestionType::Dataset
        );
        assert_eq!(
            QuestionType::classify("polymarket", None, sources::DATASET, sources::MARKET),
            QuestionType::Market
        );
        assert_eq!(
            QuestionType::classify("new_source", None, sources::DATASET, sources::MARKET),
            QuestionType::Market
        );
        assert_eq!(
            QuestionType::classify("new_source", Some(90), sources::DATASET, sources::MARKET),
            QuestionType::Dataset
        );
    }
}
