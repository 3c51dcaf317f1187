//! Error types for the newsfeed service.

use newsfeed_core::CoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum NewsFeedError {
    /// Post store error.
    #[error("post store error: {0}")]
    Core(#[from] CoreError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Pages must hold at least one post.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, NewsFeedError>;
