//! Writes snapshots. A snapshot is staged next to its final location and renamed into
//! place only after every artifact is written.

use std::fs;
use std::path::{Path, PathBuf};

use brierboard_core::errors::OutputError;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::leaderboard::Leaderboard;
use crate::reporters::{create_reporter, snapshot_formats};
use crate::sota::SotaReport;

pub const QUESTION_FIXED_EFFECTS_FILE: &str = "question_fixed_effects.json";
pub const SOTA_FILE: &str = "sota.json";

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, artifact: &str) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value).map_err(|e| OutputError::Serialize {
        artifact: artifact.to_string(),
        message: e.to_string(),
    })
}

/// Publishes dated leaderboard snapshots under one output root.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    root: PathBuf,
}

impl SnapshotWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn snapshot_dir(&self, as_of: NaiveDate) -> PathBuf {
        self.root.join(as_of.to_string())
    }

    /// Write `<root>/<as_of>/<variant>/...` for every leaderboard. Refuses to replace an
    /// existing snapshot.
    pub fn publish(&self, as_of: NaiveDate, leaderboards: &[&Leaderboard]) -> Result<PathBuf, OutputError> {
        let target = self.snapshot_dir(as_of);
        if target.exists() {
            return Err(OutputError::AlreadyPublished {
                path: target.display().to_string(),
            });
        }
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let staging = self.root.join(format!(".{as_of}.staging"));
        if staging.exists() {
            warn!(path = %staging.display(), "removing stale staging directory");
            fs::remove_dir_all(&staging).map_err(io_error(&staging))?;
        }

        let staged = self
            .stage(&staging, leaderboards)
            .and_then(|()| fs::rename(&staging, &target).map_err(io_error(&target)));
        if let Err(e) = staged {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %cleanup, "failed to remove staging directory");
            }
            return Err(e);
        }
        info!(path = %target.display(), variants = leaderboards.len(), "snapshot published");
        Ok(target)
    }

    fn stage(&self, staging: &Path, leaderboards: &[&Leaderboard]) -> Result<(), OutputError> {
        for leaderboard in leaderboards {
            let dir = staging.join(&leaderboard.variant);
            fs::create_dir_all(&dir).map_err(io_error(&dir))?;
            for format in snapshot_formats() {
                let reporter = create_reporter(format)?;
                if let Some(name) = reporter.file_name() {
                    write(&dir.join(name), &reporter.generate(leaderboard)?)?;
                }
            }
            let effects = to_json(&leaderboard.question_fixed_effects, QUESTION_FIXED_EFFECTS_FILE)?;
            write(&dir.join(QUESTION_FIXED_EFFECTS_FILE), &effects)?;
        }
        Ok(())
    }
}

fn write(path: &Path, content: &str) -> Result<(), OutputError> {
    fs::write(path, content).map_err(io_error(path))
}

/// Write `sota.json` into `dir` through a temporary file.
pub fn write_sota_report(report: &SotaReport, dir: &Path) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let target = dir.join(SOTA_FILE);
    let temp = dir.join(format!(".{SOTA_FILE}.tmp"));
    write(&temp, &sota_json(report)?)?;
    fs::rename(&temp, &target).map_err(io_error(&target))?;
    info!(path = %target.display(), "sota report written");
    Ok(target)
}

pub fn sota_json(report: &SotaReport) -> Result<String, OutputError> {
    to_json(report, SOTA_FILE)
}
