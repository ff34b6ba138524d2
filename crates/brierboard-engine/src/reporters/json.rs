//! JSON reporter: the published `leaderboard.json`.

use brierboard_core::errors::OutputError;
use chrono::NaiveDate;
use serde::Serialize;

use super::format::model_name;
use super::Reporter;
use crate::leaderboard::{Leaderboard, LeaderboardRow, SimulationMeta};

pub struct JsonReporter;

#[derive(Serialize)]
struct Document<'a> {
    variant: &'a str,
    as_of: NaiveDate,
    simulation: SimulationMeta,
    rows: Vec<Record<'a>>,
}

/// One row under the published column names.
#[derive(Serialize)]
struct Record<'a> {
    #[serde(rename = "Rank")]
    rank: Option<u32>,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Model Organization")]
    model_organization: &'a str,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Dataset")]
    dataset: Option<f64>,
    #[serde(rename = "N dataset")]
    n_dataset: usize,
    #[serde(rename = "Dataset 95% CI")]
    dataset_ci: Option<(f64, f64)>,
    #[serde(rename = "Market")]
    market: Option<f64>,
    #[serde(rename = "N market")]
    n_market: usize,
    #[serde(rename = "Market 95% CI")]
    market_ci: Option<(f64, f64)>,
    #[serde(rename = "Overall")]
    overall: Option<f64>,
    #[serde(rename = "N")]
    n: usize,
    #[serde(rename = "95% CI")]
    overall_ci: Option<(f64, f64)>,
    #[serde(rename = "P-value to best")]
    p_value: Option<f64>,
    #[serde(rename = "Pct times № 1")]
    pct_first: Option<f64>,
    #[serde(rename = "Pct times top 5%")]
    pct_top5: Option<f64>,
    #[serde(rename = "x% oracle equiv")]
    oracle_equivalent: Option<f64>,
    #[serde(rename = "Peer")]
    peer: Option<f64>,
    #[serde(rename = "BSS")]
    bss: Option<f64>,
    highlight: bool,
}

impl<'a> From<&'a LeaderboardRow> for Record<'a> {
    fn from(row: &'a LeaderboardRow) -> Self {
        Self {
            rank: row.rank,
            team: &row.forecaster.organization,
            model_organization: &row.model_organization,
            model: model_name(row),
            dataset: row.dataset.score,
            n_dataset: row.dataset.n,
            dataset_ci: row.dataset.ci,
            market: row.market.score,
            n_market: row.market.n,
            market_ci: row.market.ci,
            overall: row.overall.score,
            n: row.overall.n,
            overall_ci: row.overall.ci,
            p_value: row.p_value,
            pct_first: row.pct_first,
            pct_top5: row.pct_top5,
            oracle_equivalent: row.oracle_equivalent,
            peer: row.peer.overall,
            bss: row.bss.overall,
            highlight: row.highlight,
        }
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_name(&self) -> Option<&'static str> {
        Some("leaderboard.json")
    }

    fn generate(&self, leaderboard: &Leaderboard) -> Result<String, OutputError> {
        let doc = Document {
            variant: &leaderboard.variant,
            as_of: leaderboard.as_of,
            simulation: leaderboard.simulation,
            rows: leaderboard.rows.iter().map(Record::from).collect(),
        };
        serde_json::to_string_pretty(&doc).map_err(|e| OutputError::Serialize {
            artifact: "leaderboard.json".to_string(),
            message: e.to_string(),
        })
    }
}
