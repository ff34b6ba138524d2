//! SOTA frontier tracking and the human-parity projection.

pub mod parity;
pub mod published;
pub mod tracker;
mod trend;
pub mod types;

pub use parity::project_parity;
pub use published::{build_series, load_leaderboard, load_release_dates, sota_report, PublishedRow};
pub use tracker::compute_sota_and_trend;
pub use types::{
    AnnotatedPoint, ParityOutcome, ParityProjection, SotaPoint, SotaReport, SuppressionReason,
    TrendModel,
};
