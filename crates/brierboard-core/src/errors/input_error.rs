//! Input artifact errors.

use super::error_code::{self, BrierboardErrorCode};

/// Errors reading the upstream forecast, resolution, and question-set files.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Required input missing: {path}")]
    Missing { path: String },
}

impl BrierboardErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
