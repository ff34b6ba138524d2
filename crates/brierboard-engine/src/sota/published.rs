//! Reads a published leaderboard and a release-date file into a SOTA series.
//!
//! Published tables are parsed leniently: a malformed score, count, or interval
//! becomes `None` and the row is kept.

use std::fs;
use std::path::Path;

use brierboard_core::config::SotaConfig;
use brierboard_core::errors::InputError;
use brierboard_core::parsing::{parse_ci, parse_count, parse_date, parse_p_value, parse_score, split_csv_line};
use brierboard_core::types::ForecasterProfile;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::parity::project_parity;
use super::tracker::compute_sota_and_trend;
use super::types::{SotaPoint, SotaReport};
use crate::inputs::read_json;

/// The columns of a published row the tracker uses.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedRow {
    pub team: Option<String>,
    pub model: String,
    pub overall: Option<f64>,
    pub n: Option<u64>,
    pub ci: Option<(f64, f64)>,
    pub p_value: Option<f64>,
}

fn column(header: &[String], name: &str) -> Option<usize> {
    header.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Parse leaderboard CSV text. Only the `Model` and `Overall` columns are required.
pub fn parse_leaderboard_csv(content: &str, origin: &str) -> Result<Vec<PublishedRow>, InputError> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().map(split_csv_line).ok_or_else(|| InputError::Parse {
        path: origin.to_string(),
        message: "empty leaderboard".to_string(),
    })?;
    let required = |name: &str| {
        column(&header, name).ok_or_else(|| InputError::Parse {
            path: origin.to_string(),
            message: format!("missing column {name:?}"),
        })
    };
    let model_col = required("Model")?;
    let overall_col = required("Overall")?;
    let team_col = column(&header, "Team");
    let n_col = column(&header, "N");
    let ci_col = column(&header, "95% CI");
    let p_col = column(&header, "P-value to best");

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields = split_csv_line(line);
        let field = |col: Option<usize>| col.and_then(|c| fields.get(c)).map(String::as_str);
        let Some(model) = field(Some(model_col)).map(str::trim).filter(|m| !m.is_empty()) else {
            warn!(line = i + 2, "leaderboard row without a model, skipped");
            continue;
        };
        let overall = field(Some(overall_col)).and_then(parse_score);
        if overall.is_none() {
            debug!(model, "unparseable overall score");
        }
        rows.push(PublishedRow {
            team: field(team_col).map(|t| t.trim().to_string()),
            model: model.to_string(),
            overall,
            n: field(n_col).and_then(parse_count),
            ci: field(ci_col).and_then(parse_ci),
            p_value: field(p_col).and_then(parse_p_value),
        });
    }
    Ok(rows)
}

pub fn load_leaderboard(path: &Path) -> Result<Vec<PublishedRow>, InputError> {
    let content = read_text(path)?;
    parse_leaderboard_csv(&content, &path.display().to_string())
}

/// Release dates from JSON (`[{organization?, model, release_date?}]`) or CSV with
/// `model` and `release_date` columns and an optional `organization` column.
pub fn load_release_dates(path: &Path) -> Result<Vec<ForecasterProfile>, InputError> {
    if path.extension().is_some_and(|e| e == "json") {
        return read_json(path);
    }
    let content = read_text(path)?;
    let origin = path.display().to_string();
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().map(split_csv_line).unwrap_or_default();
    let model_col = column(&header, "model").ok_or_else(|| InputError::Parse {
        path: origin.clone(),
        message: "missing column \"model\"".to_string(),
    })?;
    let date_col = column(&header, "release_date").ok_or_else(|| InputError::Parse {
        path: origin,
        message: "missing column \"release_date\"".to_string(),
    })?;
    let org_col = column(&header, "organization");

    Ok(lines
        .map(split_csv_line)
        .filter_map(|fields| {
            let model = fields.get(model_col)?.trim().to_string();
            Some(ForecasterProfile {
                organization: org_col
                    .and_then(|c| fields.get(c))
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty()),
                model,
                release_date: fields.get(date_col).and_then(|d| parse_date(d)),
            })
        })
        .collect())
}

fn read_text(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::Missing {
            path: path.display().to_string(),
        });
    }
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn release_date(profiles: &[ForecasterProfile], row: &PublishedRow) -> Option<NaiveDate> {
    profiles
        .iter()
        .filter(|p| p.model == row.model)
        .filter(|p| match (&p.organization, &row.team) {
            (Some(org), Some(team)) => org == team,
            _ => true,
        })
        .find_map(|p| p.release_date)
}

/// Scored, dated model rows, plus the baseline's score when present.
pub fn build_series(
    rows: &[PublishedRow],
    profiles: &[ForecasterProfile],
    baseline_model: &str,
) -> (Vec<SotaPoint>, Option<f64>) {
    let baseline = rows
        .iter()
        .find(|r| r.model == baseline_model)
        .and_then(|r| r.overall);
    let mut undated = 0usize;
    let points = rows
        .iter()
        .filter(|r| r.model != baseline_model)
        .filter_map(|r| {
            let score = r.overall?;
            match release_date(profiles, r) {
                Some(date) => Some(SotaPoint::new(r.model.clone(), date, score)),
                None => {
                    undated += 1;
                    None
                }
            }
        })
        .collect();
    if undated > 0 {
        debug!(undated, "rows without a release date left out of the series");
    }
    (points, baseline)
}

/// Full tracker run over a published leaderboard.
pub fn sota_report(
    rows: &[PublishedRow],
    profiles: &[ForecasterProfile],
    config: &SotaConfig,
    as_of: NaiveDate,
) -> SotaReport {
    let baseline_model = config.effective_baseline_model();
    let (series, baseline) = build_series(rows, profiles, &baseline_model);
    let (points, trend) = compute_sota_and_trend(&series, config.effective_tolerance());
    let parity = project_parity(
        trend.as_ref(),
        baseline.map(|s| (baseline_model.as_str(), s)),
        as_of,
        config.effective_projection_horizon_years(),
    );
    info!(
        points = points.len(),
        sota = points.iter().filter(|p| p.is_sota).count(),
        trend = trend.is_some(),
        parity = parity.projection().is_some(),
        "sota report"
    );
    SotaReport {
        as_of,
        points,
        trend,
        parity,
    }
}
