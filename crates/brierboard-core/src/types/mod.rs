//! Data model shared by every stage of the engine.

pub mod forecaster;
pub mod question;
pub mod records;

pub use forecaster::{Forecaster, ForecasterId, ForecasterKind};
pub use question::{QuestionKey, QuestionMeta, QuestionType};
pub use records::{ForecastEntry, ForecastRecord, ForecastSet, ForecasterProfile, ResolutionValue};
