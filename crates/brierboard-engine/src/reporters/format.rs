//! Cell formatting shared by the table reporters.

use brierboard_core::constants::LEADERBOARD_DECIMAL_PLACES;

use crate::leaderboard::LeaderboardRow;

/// Placeholder for undefined values.
pub const MISSING: &str = "—";

pub const COLUMNS: [&str; 19] = [
    "Rank",
    "Team",
    "Model Organization",
    "Model",
    "Dataset",
    "N dataset",
    "Dataset 95% CI",
    "Market",
    "N market",
    "Market 95% CI",
    "Overall",
    "N",
    "95% CI",
    "P-value to best",
    "Pct times № 1",
    "Pct times top 5%",
    "x% oracle equiv",
    "Peer",
    "BSS",
];

pub fn score(value: Option<f64>) -> String {
    value.map_or_else(
        || MISSING.to_string(),
        |v| format!("{v:.prec$}", prec = LEADERBOARD_DECIMAL_PLACES),
    )
}

pub fn interval(ci: Option<(f64, f64)>) -> String {
    ci.map_or_else(
        || MISSING.to_string(),
        |(lo, hi)| format!("[{lo:.prec$}, {hi:.prec$}]", prec = LEADERBOARD_DECIMAL_PLACES),
    )
}

pub fn p_value(p: Option<f64>) -> String {
    match p {
        None => MISSING.to_string(),
        Some(p) if p < 0.001 => "<0.001".to_string(),
        Some(p) if p < 0.01 => "<0.01".to_string(),
        Some(p) if p < 0.05 => "<0.05".to_string(),
        Some(p) => format!("{p:.2}"),
    }
}

pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.0}%"))
}

/// Oracle accuracy in `[0, 1]` as a whole percent.
pub fn oracle(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.0}%", v * 100.0))
}

pub fn rank(rank: Option<u32>) -> String {
    rank.map_or_else(|| MISSING.to_string(), |r| r.to_string())
}

/// Benchmark models fed the crowd forecast are published under that name.
pub fn model_name(row: &LeaderboardRow) -> String {
    if row.forecaster.is_benchmark() {
        row.forecaster.model.replace("freeze values", "crowd forecast")
    } else {
        row.forecaster.model.clone()
    }
}

/// Every column, formatted, in [`COLUMNS`] order.
pub fn cells(row: &LeaderboardRow) -> Vec<String> {
    vec![
        rank(row.rank),
        row.forecaster.organization.clone(),
        row.model_organization.clone(),
        model_name(row),
        score(row.dataset.score),
        row.dataset.n.to_string(),
        interval(row.dataset.ci),
        score(row.market.score),
        row.market.n.to_string(),
        interval(row.market.ci),
        score(row.overall.score),
        row.overall.n.to_string(),
        interval(row.overall.ci),
        p_value(row.p_value),
        percent(row.pct_first),
        percent(row.pct_top5),
        oracle(row.oracle_equivalent),
        score(row.peer.overall),
        score(row.bss.overall),
    ]
}
