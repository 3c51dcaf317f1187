//! Error types for newsfeed core.

use thiserror::Error;

use crate::types::{PostId, UserId};

/// Errors that can occur during post store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The author already has a live post with this id.
    #[error("user {author} already has a post with id {post}")]
    DuplicatePost { author: UserId, post: PostId },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
