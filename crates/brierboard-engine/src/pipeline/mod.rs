//! End-to-end runs: every configured variant as one task group, then one snapshot.

pub mod publish;
pub mod task_group;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use brierboard_core::config::BrierboardConfig;
use brierboard_core::errors::PipelineError;
use chrono::NaiveDate;
use tracing::info;

use crate::inputs::RunInputs;
use crate::leaderboard::{Leaderboard, LeaderboardAssembler};

pub use publish::{write_sota_report, SnapshotWriter};
pub use task_group::{TaskGroup, TaskOutcome};

/// What a leaderboard run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub snapshot: PathBuf,
    pub leaderboards: BTreeMap<String, Leaderboard>,
}

/// Assemble every variant. Fails if any variant fails.
pub fn assemble_all(
    inputs: &RunInputs,
    config: &BrierboardConfig,
    as_of: NaiveDate,
) -> Result<BTreeMap<String, Leaderboard>, PipelineError> {
    let assembler = LeaderboardAssembler::new(config.clone(), as_of);
    let mut group = TaskGroup::new();
    for variant in config.effective_variants() {
        let assembler = &assembler;
        group.spawn(variant.name.clone(), move || {
            assembler.assemble(inputs, &variant)
        });
    }
    group.join()
}

/// Assemble every variant and publish `<output>/<as_of>/`.
pub fn run_leaderboards(
    inputs: &RunInputs,
    config: &BrierboardConfig,
    as_of: NaiveDate,
    output: &Path,
) -> Result<RunOutput, PipelineError> {
    let started = Instant::now();
    let leaderboards = assemble_all(inputs, config, as_of)?;
    let ordered: Vec<&Leaderboard> = leaderboards.values().collect();
    let snapshot = SnapshotWriter::new(output).publish(as_of, &ordered)?;
    info!(
        variants = leaderboards.len(),
        run_time_ms = started.elapsed().as_millis() as u64,
        "leaderboard run complete"
    );
    Ok(RunOutput {
        snapshot,
        leaderboards,
    })
}
