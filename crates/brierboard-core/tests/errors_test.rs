//! Tests for the brierboard error handling system.

use std::collections::HashSet;

use brierboard_core::errors::error_code;
use brierboard_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::FileNotFound {
        path: "/tmp/brierboard.toml".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let input = InputError::Missing {
        path: "questions.json".into(),
    };
    assert_eq!(input.error_code(), error_code::INPUT_ERROR);

    assert_eq!(ScoreMatrixError::Empty.error_code(), error_code::EMPTY_MATRIX);

    let fe = FixedEffectsError::NonConvergence {
        iterations: 10,
        last_change: 1e-3,
        tolerance: 1e-10,
    };
    assert_eq!(fe.error_code(), error_code::NON_CONVERGENCE);

    assert_eq!(SimulationError::NoReplicates.error_code(), error_code::SIMULATION_ERROR);
    let diverged = SimulationError::NonConvergence {
        replicate: 3,
        source: FixedEffectsError::NonConvergence {
            iterations: 10,
            last_change: 1e-3,
            tolerance: 1e-10,
        },
    };
    assert_eq!(diverged.error_code(), error_code::NON_CONVERGENCE);

    let lb = LeaderboardError::MissingReference {
        model: "Always 0.5".into(),
        axis: "dataset".into(),
    };
    assert_eq!(lb.error_code(), error_code::MISSING_REFERENCE);

    let out = OutputError::UnknownFormat("xml".into());
    assert_eq!(out.error_code(), error_code::OUTPUT_ERROR);
}

#[test]
fn test_from_conversions_keep_subsystem_code() {
    let pipeline: PipelineError = FixedEffectsError::EmptyMatrix.into();
    assert!(matches!(
        pipeline,
        PipelineError::FixedEffects(FixedEffectsError::EmptyMatrix)
    ));
    assert_eq!(pipeline.error_code(), error_code::EMPTY_MATRIX);

    let nested: LeaderboardError = FixedEffectsError::UnestimatedQuestion {
        question: "2024-07-21_acled_q1_30".into(),
    }
    .into();
    let pipeline: PipelineError = nested.into();
    assert_eq!(pipeline.error_code(), error_code::FIXED_EFFECTS_ERROR);
}

#[test]
fn test_report_string_format() {
    let err = ScoreMatrixError::Empty;
    let report = err.report_string();
    assert!(report.starts_with("[EMPTY_MATRIX] "));
}

#[test]
fn test_task_failure_lists_tasks() {
    let err = PipelineError::TasksFailed {
        failed: vec!["baseline".into(), "tournament".into()],
    };
    assert_eq!(err.to_string(), "2 task(s) failed: baseline, tournament");
    assert_eq!(err.error_code(), error_code::TASK_FAILED);
}

#[test]
fn test_error_codes_are_distinct_constants() {
    let codes: HashSet<&str> = [
        error_code::CONFIG_ERROR,
        error_code::INPUT_ERROR,
        error_code::EMPTY_MATRIX,
        error_code::NON_CONVERGENCE,
        error_code::FIXED_EFFECTS_ERROR,
        error_code::SIMULATION_ERROR,
        error_code::MISSING_REFERENCE,
        error_code::LEADERBOARD_ERROR,
        error_code::OUTPUT_ERROR,
        error_code::TASK_FAILED,
    ]
    .into_iter()
    .collect();
    assert_eq!(codes.len(), 10);
}
