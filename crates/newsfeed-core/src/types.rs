//! Strong type definitions for newsfeed.
//!
//! All identifiers are newtypes to prevent misuse at compile time: a
//! `UserId` can never be passed where a `PostId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user, the key into the user registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Create a new UserId.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Caller-supplied identifier of a post.
///
/// Unique within its author's store only. Two different authors may use
/// the same PostId.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    /// Create a new PostId.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PostId({})", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Creation sequence number of a post.
///
/// Assigned by a [`SequenceClock`](crate::clock::SequenceClock) and the sole
/// sort key for feeds. A larger Seq is a newer post.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seq(pub u64);

impl Seq {
    /// The first sequence number a fresh clock hands out.
    pub const FIRST: Self = Self(1);

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seq({})", self.0)
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
