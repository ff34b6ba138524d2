//! Loading a run's input directory.
//!
//! ```text
//! <input>/questions.json
//! <input>/resolutions.json
//! <input>/forecast_sets/*.json
//! <input>/forecasters.json      (optional)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use brierboard_core::errors::InputError;
use brierboard_core::types::{
    ForecastRecord, ForecastSet, ForecasterProfile, QuestionMeta, ResolutionValue,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const QUESTIONS_FILE: &str = "questions.json";
pub const RESOLUTIONS_FILE: &str = "resolutions.json";
pub const FORECAST_SETS_DIR: &str = "forecast_sets";
pub const FORECASTERS_FILE: &str = "forecasters.json";

/// An immutable snapshot of everything a leaderboard run reads.
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub questions: Vec<QuestionMeta>,
    pub resolutions: Vec<ResolutionValue>,
    pub records: Vec<ForecastRecord>,
    pub profiles: Vec<ForecasterProfile>,
}

impl RunInputs {
    pub fn load(dir: &Path) -> Result<Self, InputError> {
        let questions: Vec<QuestionMeta> = read_json(&dir.join(QUESTIONS_FILE))?;
        let resolutions: Vec<ResolutionValue> = read_json(&dir.join(RESOLUTIONS_FILE))?;

        let profiles_path = dir.join(FORECASTERS_FILE);
        let profiles: Vec<ForecasterProfile> = if profiles_path.exists() {
            read_json(&profiles_path)?
        } else {
            debug!(path = %profiles_path.display(), "no forecaster profiles");
            Vec::new()
        };

        let mut records = Vec::new();
        let sets = forecast_set_files(&dir.join(FORECAST_SETS_DIR))?;
        for path in &sets {
            let set: ForecastSet = read_json(path)?;
            records.extend(set.into_records());
        }

        info!(
            questions = questions.len(),
            resolutions = resolutions.len(),
            forecast_sets = sets.len(),
            records = records.len(),
            profiles = profiles.len(),
            "loaded run inputs"
        );
        Ok(Self {
            questions,
            resolutions,
            records,
            profiles,
        })
    }
}

/// `*.json` files in `dir`, sorted so loading order is stable.
fn forecast_set_files(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::Missing {
            path: dir.display().to_string(),
        });
    }
    let entries = fs::read_dir(dir).map_err(|source| InputError::Io {
        path: dir.display().to_string(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| InputError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    if !path.exists() {
        return Err(InputError::Missing {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| InputError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join(QUESTIONS_FILE),
            r#"[{"forecast_due_date":"2024-07-21","source":"manifold","id":"m1","horizon":null}]"#,
        )
        .unwrap();
        fs::write(
            root.join(RESOLUTIONS_FILE),
            r#"[{"forecast_due_date":"2024-07-21","source":"manifold","id":"m1","resolved_value":1.0}]"#,
        )
        .unwrap();
        fs::create_dir(root.join(FORECAST_SETS_DIR)).unwrap();
        fs::write(
            root.join(FORECAST_SETS_DIR).join("a.json"),
            r#"{"organization":"A","model":"a","forecast_due_date":"2024-07-21",
                "forecasts":[{"source":"manifold","id":"m1","forecast":0.7}]}"#,
        )
        .unwrap();
        fs::write(root.join(FORECAST_SETS_DIR).join("notes.txt"), "ignored").unwrap();

        let inputs = RunInputs::load(root).unwrap();
        assert_eq!(inputs.questions.len(), 1);
        assert_eq!(inputs.resolutions[0].resolved_value, Some(1.0));
        assert_eq!(inputs.records.len(), 1);
        assert!(inputs.profiles.is_empty());
    }

    #[test]
    fn test_missing_and_malformed_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunInputs::load(dir.path()).unwrap_err();
        assert!(matches!(err, InputError::Missing { .. }));

        fs::write(dir.path().join(QUESTIONS_FILE), "not json").unwrap();
        let err = RunInputs::load(dir.path()).unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
    }
}
