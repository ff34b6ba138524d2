//! Output artifact errors.

use super::error_code::{self, BrierboardErrorCode};

/// Errors writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {artifact}: {message}")]
    Serialize { artifact: String, message: String },

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    #[error("Snapshot already published: {path}")]
    AlreadyPublished { path: String },
}

impl BrierboardErrorCode for OutputError {
    fn error_code(&self) -> &'static str {
        error_code::OUTPUT_ERROR
    }
}
