//! # Newsfeed
//!
//! An in-memory social feed: users follow each other, publish and delete
//! posts, and read a merged newest-first timeline of everyone they follow.
//!
//! ## Overview
//!
//! - **Posts**: Each user's posts live in a [`PostStore`], newest first
//! - **Follows**: Each user has a [`FollowSet`] that always includes themselves
//! - **Registry**: Users are provisioned on first reference, never removed
//! - **Feeds**: A k-way merge over the followed stores produces the timeline
//!   without sorting every post
//!
//! ## Usage
//!
//! ```rust
//! use newsfeed::{NewsFeed, PostId, UserId};
//!
//! let mut feed = NewsFeed::new();
//! let (alice, bob) = (UserId::new(1), UserId::new(2));
//!
//! feed.follow(alice, bob);
//! feed.create_post(bob, PostId::new(100)).unwrap();
//! feed.create_post(alice, PostId::new(200)).unwrap();
//!
//! assert_eq!(feed.feed(alice), vec![PostId::new(200), PostId::new(100)]);
//! assert_eq!(feed.feed(bob), vec![PostId::new(100)]);
//! ```
//!
//! ## Re-exports
//!
//! - `newsfeed::core` - Identifiers, post stores and follow sets

pub mod config;
pub mod error;
pub mod merge;
pub mod registry;
pub mod service;
pub mod shared;
pub mod view;

// Re-export component crates
pub use newsfeed_core as core;

// Re-export main types for convenience
pub use config::{NewsFeedConfig, DEFAULT_FEED_SIZE, DEFAULT_PAGE_SIZE};
pub use error::{ConfigError, NewsFeedError, Result};
pub use merge::FeedMerge;
pub use registry::{FeedSource, UserRecord, UserRegistry};
pub use service::NewsFeed;
pub use shared::SharedNewsFeed;
pub use view::{FeedPageView, FeedView};

// Re-export commonly used core types
pub use newsfeed_core::{CoreError, FollowSet, Post, PostId, PostStore, Seq, SequenceClock, UserId};
