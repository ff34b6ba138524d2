//! Span definitions per pipeline stage.

/// Create a score matrix build span.
#[macro_export]
macro_rules! build_span {
    ($records:expr) => {
        tracing::info_span!("brierboard.build", records = $records)
    };
}

/// Create a fixed effects fit span.
#[macro_export]
macro_rules! fit_span {
    ($question_type:expr, $cells:expr) => {
        tracing::debug_span!("brierboard.fit", question_type = %$question_type, cells = $cells)
    };
}

/// Create a rank stability simulation span.
#[macro_export]
macro_rules! simulate_span {
    ($replicates:expr, $seed:expr) => {
        tracing::info_span!("brierboard.simulate", replicates = $replicates, seed = $seed)
    };
}

/// Create a leaderboard assembly span.
#[macro_export]
macro_rules! assemble_span {
    ($variant:expr) => {
        tracing::info_span!("brierboard.assemble", variant = %$variant)
    };
}

/// Create a SOTA tracking span.
#[macro_export]
macro_rules! sota_span {
    ($points:expr) => {
        tracing::info_span!("brierboard.sota", points = $points)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const BUILD: &str = "brierboard.build";
    pub const FIT: &str = "brierboard.fit";
    pub const SIMULATE: &str = "brierboard.simulate";
    pub const ASSEMBLE: &str = "brierboard.assemble";
    pub const SOTA: &str = "brierboard.sota";
}
