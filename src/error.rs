//! Error types for catalog loading and request input validation
//!
//! Unknown bikes, missing geometry and mechanical incompatibility are
//! verdicts, not errors; they never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected bike identity supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Both brand and model are required")]
    Missing,

    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains invalid characters")]
    InvalidCharacters { field: &'static str },

    #[error("Batch too large (max {max} bikes)")]
    BatchTooLarge { max: usize },
}
