//! CLI error type.

use thiserror::Error;

/// Errors surfaced by the `opus` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing failed.
    #[error("pricing error: {0}")]
    Pricing(#[from] opus::Error),

    /// Writing the report failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
