//! BrierboardErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable code string that
/// downstream job monitors can match on.
pub trait BrierboardErrorCode {
    /// Returns the error code string (e.g., "NON_CONVERGENCE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const EMPTY_MATRIX: &str = "EMPTY_MATRIX";
pub const NON_CONVERGENCE: &str = "NON_CONVERGENCE";
pub const FIXED_EFFECTS_ERROR: &str = "FIXED_EFFECTS_ERROR";
pub const SIMULATION_ERROR: &str = "SIMULATION_ERROR";
pub const MISSING_REFERENCE: &str = "MISSING_REFERENCE";
pub const LEADERBOARD_ERROR: &str = "LEADERBOARD_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
pub const TASK_FAILED: &str = "TASK_FAILED";
