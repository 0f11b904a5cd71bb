//! Error types for envbuild-core.

use thiserror::Error;

/// Configuration problems detected before any I/O happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No environment name was supplied (or it was blank).
    #[error("environment is required; pass --environment or set ENVIRONMENT")]
    MissingEnvironment,

    /// The environment name cannot be used as a parameter-store namespace.
    #[error("invalid environment '{value}': {reason}")]
    InvalidEnvironment { value: String, reason: &'static str },

    /// The process working directory could not be determined.
    #[error("cannot determine working directory")]
    CurrentDir(#[source] std::io::Error),
}
