/// Organization that owns the benchmark's own reference and baseline forecasters.
pub const BENCHMARK_ORGANIZATION: &str = "ForecastBench";

/// Score every axis is rescaled to for the Always 0.5 forecaster.
pub const ALWAYS_HALF_TARGET_SCORE: f64 = 0.25;

/// Days a forecaster must wait after its first due date before it is published.
pub const DEFAULT_INCLUSION_DELAY_DAYS: i64 = 100;

/// Models released more than this many days before a due date do not inform difficulty.
pub const DEFAULT_MODEL_RELEASE_CUTOFF_DAYS: i64 = 365;

/// Share of imputed forecasts (percent) above which an outside forecaster is dropped.
pub const DEFAULT_IMPUTED_CUTOFF_PCT: f64 = 5.0;

/// Default number of bootstrap replicates.
pub const DEFAULT_REPLICATES: u32 = 1999;

/// Default resampling seed.
pub const DEFAULT_SEED: u64 = 20_240_721;

/// Fixed-effects convergence tolerance (max absolute change of any effect).
pub const DEFAULT_FE_TOLERANCE: f64 = 1e-10;

/// Fixed-effects iteration ceiling.
pub const DEFAULT_FE_MAX_ITERATIONS: u32 = 10_000;

/// Two-sided confidence level used throughout.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Top-percentile cut for "pct times top 5%".
pub const TOP_PERCENTILE: f64 = 0.05;

/// Normal-approximation critical value for large samples.
pub const NORMAL_CRITICAL_95: f64 = 1.96;

/// Above this many degrees of freedom the t critical value falls back to the normal one.
pub const T_TABLE_MAX_DF: f64 = 30.0;

/// Average month length in days (365.25 / 12).
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Minimum number of SOTA points before a trend is fit.
pub const MIN_TREND_POINTS: usize = 3;

/// Parity projections further out than this are suppressed.
pub const DEFAULT_PROJECTION_HORIZON_YEARS: u32 = 20;

/// Decimal places used in published tables.
pub const LEADERBOARD_DECIMAL_PLACES: usize = 3;

/// Benchmark forecaster names.
pub mod models {
    pub const ALWAYS_0: &str = "Always 0";
    pub const ALWAYS_1: &str = "Always 1";
    pub const ALWAYS_HALF: &str = "Always 0.5";
    pub const RANDOM_UNIFORM: &str = "Random Uniform";
    pub const NAIVE: &str = "Naive Forecaster";
    pub const IMPUTED: &str = "Imputed Forecaster";
    pub const SUPERFORECASTER_MEDIAN: &str = "Superforecaster median forecast";
    pub const PUBLIC_MEDIAN: &str = "Public median forecast";

    /// Trivial references that never inform question difficulty.
    pub const EXCLUDED_FROM_FIT: &[&str] =
        &[ALWAYS_0, ALWAYS_1, ALWAYS_HALF, RANDOM_UNIFORM, IMPUTED];

    /// Human aggregates highlighted in published tables.
    pub const HUMAN_BASELINES: &[&str] = &[SUPERFORECASTER_MEDIAN, PUBLIC_MEDIAN];
}

/// Question sources, split by type.
pub mod sources {
    pub const DATASET: &[&str] = &["acled", "dbnomics", "fred", "wikipedia", "yfinance"];
    pub const MARKET: &[&str] = &["manifold", "metaculus", "infer", "polymarket"];
}
