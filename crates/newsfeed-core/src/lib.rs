//! # Newsfeed Core
//!
//! Pure primitives for newsfeed: identifiers, the sequence clock, per-user
//! post stores and follow sets.
//!
//! This crate contains no I/O and no cross-user logic. Everything here is a
//! single-owner data structure; the registry and the feed merge live in the
//! `newsfeed` crate.
//!
//! ## Key Types
//!
//! - [`UserId`], [`PostId`] - Caller-supplied identifiers
//! - [`Seq`] - Creation sequence number, the global sort key
//! - [`SequenceClock`] - Hands out one [`Seq`] per post
//! - [`PostStore`] - One user's posts, newest first, O(1) insert and delete
//! - [`FollowSet`] - The users one user follows, self included

pub mod clock;
pub mod error;
pub mod follow;
pub mod post_store;
pub mod types;

pub use clock::SequenceClock;
pub use error::{CoreError, Result};
pub use follow::FollowSet;
pub use post_store::{Cursor, Iter, Post, PostStore};
pub use types::{PostId, Seq, UserId};
