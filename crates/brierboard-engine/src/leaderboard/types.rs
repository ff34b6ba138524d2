//! Published leaderboard rows.

use brierboard_core::types::{ForecasterId, ForecasterKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fixed_effects::QuestionFixedEffect;
use crate::scoring::{Axis, AxisScores};

/// A score with its sample size and bootstrap interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreColumn {
    pub score: Option<f64>,
    pub n: usize,
    pub ci: Option<(f64, f64)>,
}

/// One forecaster's published row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// "min" rank by overall score; `None` when overall is undefined.
    pub rank: Option<u32>,
    pub forecaster: ForecasterId,
    pub model_organization: String,
    pub kind: ForecasterKind,
    pub highlight: bool,
    pub dataset: ScoreColumn,
    pub market: ScoreColumn,
    pub overall: ScoreColumn,
    pub p_value: Option<f64>,
    pub p_value_bh: Option<f64>,
    pub pct_first: Option<f64>,
    pub pct_top5: Option<f64>,
    pub oracle_equivalent: Option<f64>,
    pub peer: AxisScores,
    pub bss: AxisScores,
}

impl LeaderboardRow {
    pub fn column(&self, axis: Axis) -> &ScoreColumn {
        match axis {
            Axis::Dataset => &self.dataset,
            Axis::Market => &self.market,
            Axis::Overall => &self.overall,
        }
    }
}

/// Replicate bookkeeping carried into the published artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationMeta {
    pub replicates_requested: u32,
    pub replicates_valid: u32,
    pub seed: u64,
}

/// One variant's leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub variant: String,
    pub as_of: NaiveDate,
    /// Sorted by rank; unranked rows last.
    pub rows: Vec<LeaderboardRow>,
    pub simulation: SimulationMeta,
    #[serde(skip)]
    pub question_fixed_effects: Vec<QuestionFixedEffect>,
}

impl Leaderboard {
    pub fn row(&self, id: &ForecasterId) -> Option<&LeaderboardRow> {
        self.rows.iter().find(|r| &r.forecaster == id)
    }

    pub fn ranked(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.rows.iter().filter(|r| r.rank.is_some())
    }
}
