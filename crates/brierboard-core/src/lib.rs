//! # brierboard-core
//!
//! Foundation crate for the brierboard scoring engine.
//! Defines the data model, errors, config, tracing setup, and constants.
//! The engine and CLI crates depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod parsing;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::BrierboardConfig;
pub use errors::{BrierboardErrorCode, PipelineError};
pub use types::{
    ForecastRecord, Forecaster, ForecasterId, ForecasterKind, QuestionKey, QuestionMeta,
    QuestionType, ResolutionValue,
};
