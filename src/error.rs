//! Error types for bundle build operations.

use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// Fixed fatal error for a rejected build request.
    ///
    /// Carries no platform details on purpose: the diagnostic (invalid
    /// platform plus the supported list) is emitted through the reporter
    /// before this error is returned.
    #[error("Bundling failed")]
    BuildFailed,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Engine session errors
    #[error("Engine error: {0}")]
    Engine(String),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}
