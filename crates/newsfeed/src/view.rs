//! Printable feed results.
//!
//! These render feeds the way a console front end shows them: a header line
//! followed by one numbered line per post.

use std::fmt;

use newsfeed_core::{PostId, UserId};
use serde::{Deserialize, Serialize};

/// A user's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedView {
    pub user: UserId,
    pub posts: Vec<PostId>,
}

impl fmt::Display for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Feed for user {}", self.user)?;
        write_posts(f, &self.posts)
    }
}

/// One non-empty page of a user's feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPageView {
    pub user: UserId,
    pub page: usize,
    pub posts: Vec<PostId>,
}

impl fmt::Display for FeedPageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page number {} of user {} feed", self.page, self.user)?;
        write_posts(f, &self.posts)
    }
}

fn write_posts(f: &mut fmt::Formatter<'_>, posts: &[PostId]) -> fmt::Result {
    for (i, post) in posts.iter().enumerate() {
        writeln!(f, "Post {} {}", i + 1, post)?;
    }
    Ok(())
}
