//! Error types for cellgrid.

use thiserror::Error;

/// Errors raised while building a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
}

/// Errors raised while loading, saving or validating a demo configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
