//! Input records: forecasts, resolutions, and forecaster profiles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::forecaster::ForecasterId;
use super::question::QuestionKey;

/// One probability submitted by one forecaster for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub forecaster: ForecasterId,
    pub model_organization: String,
    pub question: QuestionKey,
    pub predicted_probability: f64,
    pub submission_date: NaiveDate,
    /// Filled in upstream rather than forecast by the submitter.
    #[serde(default)]
    pub imputed: bool,
}

/// Ground truth for one question. `None` means not (yet) resolvable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionValue {
    #[serde(flatten)]
    pub question: QuestionKey,
    pub resolved_value: Option<f64>,
    #[serde(default)]
    pub resolution_date: Option<NaiveDate>,
}

/// One forecast line inside a submitted forecast set file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub source: String,
    pub id: String,
    #[serde(default)]
    pub horizon: Option<u32>,
    pub forecast: f64,
    #[serde(default)]
    pub submission_date: Option<NaiveDate>,
    #[serde(default)]
    pub imputed: bool,
}

/// A forecast set file: one team's forecasts for one question-set release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    pub organization: String,
    pub model: String,
    #[serde(default)]
    pub model_organization: Option<String>,
    pub forecast_due_date: NaiveDate,
    pub forecasts: Vec<ForecastEntry>,
}

impl ForecastSet {
    /// Flatten into records. Entries without a submission date were submitted on the
    /// due date.
    pub fn into_records(self) -> Vec<ForecastRecord> {
        let forecaster = ForecasterId::new(self.organization, self.model);
        let model_organization = self
            .model_organization
            .unwrap_or_else(|| forecaster.organization.clone());
        let due = self.forecast_due_date;
        self.forecasts
            .into_iter()
            .map(|entry| ForecastRecord {
                forecaster: forecaster.clone(),
                model_organization: model_organization.clone(),
                question: QuestionKey::new(due, entry.source, entry.id, entry.horizon),
                predicted_probability: entry.forecast,
                submission_date: entry.submission_date.unwrap_or(due),
                imputed: entry.imputed,
            })
            .collect()
    }
}

/// Release metadata for a model. `organization` narrows the match when several teams
/// submit the same model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecasterProfile {
    #[serde(default)]
    pub organization: Option<String>,
    pub model: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl ForecasterProfile {
    pub fn matches(&self, id: &ForecasterId) -> bool {
        self.model == id.model
            && self
                .organization
                .as_deref()
                .map_or(true, |org| org == id.organization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_set_defaults_submission_date_to_due_date() {
        let json = r#"{
            "organization": "Acme",
            "model": "m1",
            "forecast_due_date": "2024-07-21",
            "forecasts": [
                {"source": "acled", "id": "q1", "horizon": 30, "forecast": 0.4},
                {"source": "manifold", "id": "m1", "forecast": 0.9,
                 "submission_date": "2024-07-20", "imputed": true}
            ]
        }"#;
        let set: ForecastSet = serde_json::from_str(json).unwrap();
        let records = set.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].submission_date.to_string(), "2024-07-21");
        assert_eq!(records[0].model_organization, "Acme");
        assert_eq!(records[1].question.horizon, None);
        assert!(records[1].imputed);
    }

    #[test]
    fn test_resolution_value_flattens_question() {
        let json = r#"{"forecast_due_date": "2024-07-21", "source": "fred", "id": "x",
                       "horizon": 7, "resolved_value": null}"#;
        let r: ResolutionValue = serde_json::from_str(json).unwrap();
        assert_eq!(r.question.horizon, Some(7));
        assert!(r.resolved_value.is_none());
    }
}
