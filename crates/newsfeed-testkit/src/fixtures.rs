//! Test fixtures and helpers.
//!
//! Common setup code for integration tests and benchmarks.

use newsfeed::{NewsFeed, NewsFeedConfig, PostId, UserId};

/// A test fixture wrapping a service with shorthand helpers.
pub struct TestFixture {
    pub feed: NewsFeed,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self {
            feed: NewsFeed::new(),
        }
    }

    /// Create a fixture with a custom configuration.
    ///
    /// Panics on an invalid configuration; fixtures are for tests.
    pub fn with_config(config: NewsFeedConfig) -> Self {
        Self {
            feed: NewsFeed::with_config(config).expect("invalid fixture config"),
        }
    }

    /// Create a post, panicking on a duplicate id.
    pub fn post(&mut self, user: u64, post: u64) -> &mut Self {
        self.feed
            .create_post(UserId::new(user), PostId::new(post))
            .expect("duplicate post in fixture");
        self
    }

    /// Make `user` follow each of `targets`.
    pub fn follow_all(&mut self, user: u64, targets: impl IntoIterator<Item = u64>) -> &mut Self {
        for target in targets {
            self.feed.follow(UserId::new(user), UserId::new(target));
        }
        self
    }

    /// The default-size feed of `user` as raw ids.
    pub fn feed_ids(&self, user: u64) -> Vec<u64> {
        raw(self.feed.feed(UserId::new(user)))
    }

    /// A page of the feed of `user` as raw ids.
    pub fn page_ids(&self, user: u64, page: usize) -> Vec<u64> {
        raw(self.feed.feed_page(UserId::new(user), page))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert post ids to their raw values.
pub fn raw(ids: Vec<PostId>) -> Vec<u64> {
    ids.into_iter().map(|id| id.get()).collect()
}

/// A fan-in fixture: user 0 follows `authors` users, each of which has
/// written `posts_per_author` posts, created round-robin so the authors'
/// histories interleave.
///
/// Post ids are `author * 1_000_000 + n`.
pub fn fan_in(authors: u64, posts_per_author: u64) -> TestFixture {
    let mut fixture = TestFixture::new();
    fixture.follow_all(0, 1..=authors);
    for n in 0..posts_per_author {
        for author in 1..=authors {
            fixture.post(author, author * 1_000_000 + n);
        }
    }
    fixture
}
