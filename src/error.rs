//! Error types for revue.

use thiserror::Error;

/// Errors that can occur in revue operations.
#[derive(Debug, Error)]
pub enum RevueError {
    /// Database open, query, or migration failure.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration file or paths problem.
    #[error("config error: {0}")]
    Config(String),

    /// The review-settings inheritance chain cannot be resolved,
    /// e.g. a cyclic page hierarchy or a missing site-wide default.
    #[error("review configuration error: {0}")]
    Configuration(String),

    /// The acting user is not allowed to perform the operation.
    #[error("permission denied: {0}")]
    Permission(String),

    /// A referenced page, user, or group does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// JSON serialization failure.
    #[error("failed to serialize output: {0}")]
    Parse(#[from] serde_json::Error),
}
