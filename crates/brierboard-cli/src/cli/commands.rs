use std::path::Path;

use anyhow::{Context, Result};
use brierboard_core::config::{BrierboardConfig, CliOverrides};
use brierboard_core::errors::{ConfigError, InputError, OutputError};
use brierboard_core::{BrierboardErrorCode, PipelineError};
use brierboard_engine::inputs::RunInputs;
use brierboard_engine::pipeline::{run_leaderboards, write_sota_report};
use brierboard_engine::pipeline::publish::sota_json;
use brierboard_engine::reporters::create_reporter;
use brierboard_engine::sota::{load_leaderboard, load_release_dates, sota_report};
use chrono::{Local, NaiveDate};
use tracing::info;

use super::args::{Cli, Command, LeaderboardArgs, SotaArgs};

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.cmd {
        Command::Leaderboard(args) => leaderboard(&args),
        Command::Sota(args) => sota(&args),
    }
}

/// Stable code of the first brierboard error in the chain.
pub fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(e) = e.downcast_ref::<PipelineError>() {
        e.error_code()
    } else if let Some(e) = e.downcast_ref::<ConfigError>() {
        e.error_code()
    } else if let Some(e) = e.downcast_ref::<InputError>() {
        e.error_code()
    } else if let Some(e) = e.downcast_ref::<OutputError>() {
        e.error_code()
    } else {
        "UNEXPECTED"
    }
}

fn load_config(explicit: Option<&Path>, overrides: &CliOverrides) -> Result<BrierboardConfig> {
    let config = match explicit {
        Some(path) => BrierboardConfig::load_file(path, Some(overrides))?,
        None => {
            let cwd = std::env::current_dir().context("resolving the working directory")?;
            BrierboardConfig::load(&cwd, Some(overrides))?
        }
    };
    Ok(config)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn leaderboard(args: &LeaderboardArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.overrides())?;
    let as_of = args.as_of.unwrap_or_else(today);
    let inputs = RunInputs::load(&args.input)
        .with_context(|| format!("loading inputs from {}", args.input.display()))?;

    let run = run_leaderboards(&inputs, &config, as_of, &args.output)?;
    if args.print {
        let console = create_reporter("console")?;
        for leaderboard in run.leaderboards.values() {
            println!("{}", console.generate(leaderboard)?);
        }
    }
    info!(snapshot = %run.snapshot.display(), "done");
    println!("{}", run.snapshot.display());
    Ok(())
}

fn sota(args: &SotaArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.overrides())?;
    let as_of = args.as_of.unwrap_or_else(today);
    let rows = load_leaderboard(&args.leaderboard)?;
    let profiles = load_release_dates(&args.release_dates)?;

    let report = sota_report(&rows, &profiles, &config.sota, as_of);
    match &args.output {
        Some(dir) => {
            let path = write_sota_report(&report, dir)?;
            println!("{}", path.display());
        }
        None => println!("{}", sota_json(&report)?),
    }
    Ok(())
}
