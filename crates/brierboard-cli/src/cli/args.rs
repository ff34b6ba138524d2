use std::path::PathBuf;

use brierboard_core::config::{CiMethod, CliOverrides, OverallPolicy};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "brierboard",
    version,
    about = "Difficulty-adjusted Brier leaderboards for forecasting benchmarks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every configured variant and publish a dated snapshot
    Leaderboard(LeaderboardArgs),
    /// Track the SOTA frontier of a published leaderboard and project human parity
    Sota(SotaArgs),
}

#[derive(Args, Debug)]
pub struct LeaderboardArgs {
    /// Input directory (questions.json, resolutions.json, forecast_sets/)
    #[arg(long)]
    pub input: PathBuf,

    /// Output root; the snapshot is written to <output>/<as-of>/
    #[arg(long)]
    pub output: PathBuf,

    /// Snapshot date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Bootstrap replicates
    #[arg(long)]
    pub replicates: Option<u32>,

    /// Resampling seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulation worker threads (0 = all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Confidence interval method: percentile or bca
    #[arg(long)]
    pub ci_method: Option<CiMethod>,

    /// Overall score when one axis is missing: require_both or carry_forward
    #[arg(long)]
    pub overall_policy: Option<OverallPolicy>,

    /// Config file. Defaults to ./brierboard.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print each leaderboard to the terminal after publishing
    #[arg(long)]
    pub print: bool,
}

impl LeaderboardArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            replicates: self.replicates,
            seed: self.seed,
            threads: self.threads,
            ci_method: self.ci_method,
            overall_policy: self.overall_policy,
            baseline_model: None,
        }
    }
}

#[derive(Args, Debug)]
pub struct SotaArgs {
    /// Published leaderboard CSV
    #[arg(long)]
    pub leaderboard: PathBuf,

    /// Model release dates (CSV or JSON)
    #[arg(long)]
    pub release_dates: PathBuf,

    /// Human baseline row the parity date is projected against
    #[arg(long)]
    pub baseline_model: String,

    /// Projection reference date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Directory to write sota.json into. Prints to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Config file. Defaults to ./brierboard.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SotaArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            baseline_model: Some(self.baseline_model.clone()),
            ..Default::default()
        }
    }
}
