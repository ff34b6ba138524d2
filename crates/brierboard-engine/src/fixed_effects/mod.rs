//! Two-way fixed effects: `score[f, q] ≈ μ + α_f + β_q`.

pub mod components;
pub mod estimator;
pub mod panel;
pub mod types;

pub use estimator::FixedEffectsEstimator;
pub use panel::{FitSample, Panel, PanelCell, PanelQuestion};
pub use types::{FixedEffectsModel, QuestionFixedEffect};
