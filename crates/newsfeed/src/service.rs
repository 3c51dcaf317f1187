//! The NewsFeed service: unified API over users, posts and feeds.
//!
//! The service owns the user registry and the sequence clock. Mutations
//! take `&mut self` and provision unknown users on the way in; feed queries
//! take `&self` and treat unknown users as having nothing to show.

use newsfeed_core::{Post, PostId, Seq, SequenceClock, UserId};
use tracing::debug;

use crate::config::NewsFeedConfig;
use crate::error::Result;
use crate::merge::{self, FeedMerge};
use crate::registry::UserRegistry;
use crate::view::{FeedPageView, FeedView};

/// The main NewsFeed struct.
///
/// Provides a unified API for:
/// - Creating and deleting posts
/// - Following and unfollowing users
/// - Reading merged feeds, whole or paginated
///
/// Single-threaded; wrap it in a [`SharedNewsFeed`](crate::SharedNewsFeed)
/// for concurrent access.
#[derive(Debug, Default)]
pub struct NewsFeed {
    /// Every known user.
    registry: UserRegistry,
    /// Source of post sequence numbers.
    clock: SequenceClock,
    /// Configuration.
    config: NewsFeedConfig,
}

impl NewsFeed {
    /// Create a service with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with a validated configuration.
    pub fn with_config(config: NewsFeedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: UserRegistry::new(),
            clock: SequenceClock::new(),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NewsFeedConfig {
        &self.config
    }

    /// Get the registry reference.
    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Post Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a post as the newest post of `user`.
    ///
    /// # Errors
    /// Fails if `user` already has a live post with id `post`. Nothing
    /// changes in that case.
    pub fn create_post(&mut self, user: UserId, post: PostId) -> Result<Post> {
        let record = self.registry.get_or_create(user);
        Ok(record.posts_mut().create(post, &self.clock)?)
    }

    /// Delete a post of `user`.
    ///
    /// Returns the deleted post, or `None` if `user` had no such post.
    pub fn delete_post(&mut self, user: UserId, post: PostId) -> Option<Post> {
        let deleted = self.registry.get_or_create(user).posts_mut().delete(post);
        if deleted.is_none() {
            debug!(%user, %post, "delete of unknown post ignored");
        }
        deleted
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Follow Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Make `user` follow `target`. Returns whether anything changed.
    pub fn follow(&mut self, user: UserId, target: UserId) -> bool {
        self.registry.get_or_create(target);
        self.registry.get_or_create(user).follows_mut().follow(target)
    }

    /// Make `user` stop following `target`. Returns whether anything changed.
    ///
    /// A user always follows themselves; `unfollow(u, u)` is a no-op.
    pub fn unfollow(&mut self, user: UserId, target: UserId) -> bool {
        self.registry.get_or_create(target);
        self.registry.get_or_create(user).follows_mut().unfollow(target)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Feed Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The newest `feed_size` post ids reachable from `user`, newest first.
    pub fn feed(&self, user: UserId) -> Vec<PostId> {
        self.feed_with_size(user, self.config.feed_size)
    }

    /// The newest `limit` post ids reachable from `user`, newest first.
    pub fn feed_with_size(&self, user: UserId, limit: usize) -> Vec<PostId> {
        merge::top_posts(&self.registry, user, limit)
    }

    /// Page `page` (zero-based) of the feed of `user`, `page_size` posts
    /// per page. Empty once past the end.
    pub fn feed_page(&self, user: UserId, page: usize) -> Vec<PostId> {
        self.feed_page_with_size(user, page, self.config.page_size)
    }

    /// Page `page` (zero-based) of the feed of `user` with an explicit page
    /// size.
    pub fn feed_page_with_size(&self, user: UserId, page: usize, page_size: usize) -> Vec<PostId> {
        merge::page_posts(&self.registry, user, page, page_size)
    }

    /// Lazy iterator over the entire feed of `user`.
    pub fn feed_posts(&self, user: UserId) -> FeedMerge<'_, UserRegistry> {
        FeedMerge::new(&self.registry, user)
    }

    /// The feed of `user`, ready for printing.
    pub fn feed_view(&self, user: UserId) -> FeedView {
        FeedView {
            user,
            posts: self.feed(user),
        }
    }

    /// A page of the feed of `user`, ready for printing. `None` when the
    /// page is empty.
    pub fn feed_page_view(&self, user: UserId, page: usize) -> Option<FeedPageView> {
        let posts = self.feed_page(user, page);
        if posts.is_empty() {
            return None;
        }
        Some(FeedPageView { user, page, posts })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Introspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of users referenced so far.
    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether `user` follows `target`.
    pub fn follows(&self, user: UserId, target: UserId) -> bool {
        self.registry
            .get(user)
            .is_some_and(|record| record.follows().contains(target))
    }

    /// Users followed by `user`, sorted ascending. Empty for unknown users.
    pub fn followees(&self, user: UserId) -> Vec<UserId> {
        let mut followees: Vec<UserId> = self
            .registry
            .get(user)
            .map(|record| record.follows().iter().collect())
            .unwrap_or_default();
        followees.sort();
        followees
    }

    /// The posts of `user` alone, newest first.
    pub fn posts_of(&self, user: UserId) -> Vec<PostId> {
        self.registry
            .get(user)
            .map(|record| record.posts().iter().map(|post| post.id).collect())
            .unwrap_or_default()
    }

    /// The sequence number of the most recently created post.
    pub fn last_seq(&self) -> Option<Seq> {
        self.clock.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, NewsFeedError};
    use newsfeed_core::CoreError;

    fn u(id: u64) -> UserId {
        UserId::new(id)
    }

    fn p(id: u64) -> PostId {
        PostId::new(id)
    }

    fn raw(ids: Vec<PostId>) -> Vec<u64> {
        ids.into_iter().map(|id| id.get()).collect()
    }

    #[test]
    fn test_own_posts_in_own_feed() {
        let mut feed = NewsFeed::new();
        feed.create_post(u(1), p(5)).unwrap();
        feed.create_post(u(1), p(6)).unwrap();

        assert_eq!(raw(feed.feed(u(1))), vec![6, 5]);
    }

    #[test]
    fn test_mutations_provision_users() {
        let mut feed = NewsFeed::new();
        feed.delete_post(u(1), p(1));
        feed.follow(u(2), u(3));
        feed.unfollow(u(4), u(5));

        assert_eq!(feed.user_count(), 5);
    }

    #[test]
    fn test_feed_queries_do_not_provision() {
        let feed = NewsFeed::new();
        assert!(feed.feed(u(1)).is_empty());
        assert!(feed.feed_page(u(1), 0).is_empty());
        assert_eq!(feed.user_count(), 0);
    }

    #[test]
    fn test_duplicate_post_rejected() {
        let mut feed = NewsFeed::new();
        feed.create_post(u(1), p(7)).unwrap();

        let err = feed.create_post(u(1), p(7)).unwrap_err();
        assert!(matches!(
            err,
            NewsFeedError::Core(CoreError::DuplicatePost { .. })
        ));
        assert_eq!(raw(feed.feed(u(1))), vec![7]);
        assert_eq!(feed.last_seq(), Some(Seq(1)));
    }

    #[test]
    fn test_same_post_id_across_authors() {
        let mut feed = NewsFeed::new();
        feed.follow(u(1), u(2));
        feed.create_post(u(1), p(7)).unwrap();
        feed.create_post(u(2), p(7)).unwrap();

        assert_eq!(raw(feed.feed(u(1))), vec![7, 7]);
        feed.delete_post(u(2), p(7));
        assert_eq!(raw(feed.posts_of(u(1))), vec![7]);
        assert_eq!(raw(feed.feed(u(1))), vec![7]);
    }

    #[test]
    fn test_follow_and_unfollow_report_changes() {
        let mut feed = NewsFeed::new();
        assert!(feed.follow(u(1), u(2)));
        assert!(!feed.follow(u(1), u(2)));
        assert!(feed.follows(u(1), u(2)));
        assert!(feed.unfollow(u(1), u(2)));
        assert!(!feed.unfollow(u(1), u(2)));
        assert!(!feed.follows(u(1), u(2)));
    }

    #[test]
    fn test_self_unfollow_keeps_own_posts() {
        let mut feed = NewsFeed::new();
        feed.create_post(u(1), p(1)).unwrap();

        assert!(!feed.unfollow(u(1), u(1)));
        assert!(feed.follows(u(1), u(1)));
        assert_eq!(raw(feed.feed(u(1))), vec![1]);
    }

    #[test]
    fn test_followees_sorted() {
        let mut feed = NewsFeed::new();
        feed.follow(u(5), u(9));
        feed.follow(u(5), u(2));
        assert_eq!(feed.followees(u(5)), vec![u(2), u(5), u(9)]);
        assert!(feed.followees(u(42)).is_empty());
    }

    #[test]
    fn test_with_config_validates() {
        let err = NewsFeed::with_config(NewsFeedConfig {
            feed_size: 10,
            page_size: 0,
        })
        .unwrap_err();
        assert!(matches!(err, NewsFeedError::Config(ConfigError::ZeroPageSize)));
    }

    #[test]
    fn test_custom_sizes() {
        let mut feed = NewsFeed::with_config(NewsFeedConfig {
            feed_size: 2,
            page_size: 3,
        })
        .unwrap();
        for id in 1..=7 {
            feed.create_post(u(1), p(id)).unwrap();
        }

        assert_eq!(raw(feed.feed(u(1))), vec![7, 6]);
        assert_eq!(raw(feed.feed_page(u(1), 1)), vec![4, 3, 2]);
        assert_eq!(raw(feed.feed_page(u(1), 2)), vec![1]);
        assert_eq!(raw(feed.feed_with_size(u(1), 4)), vec![7, 6, 5, 4]);
    }

    #[test]
    fn test_page_view_none_when_empty() {
        let mut feed = NewsFeed::new();
        feed.create_post(u(1), p(1)).unwrap();

        assert!(feed.feed_page_view(u(1), 0).is_some());
        assert!(feed.feed_page_view(u(1), 1).is_none());
        assert!(feed.feed_page_view(u(2), 0).is_none());
    }

    #[test]
    fn test_feed_posts_carry_authors() {
        let mut feed = NewsFeed::new();
        feed.follow(u(1), u(2));
        feed.create_post(u(2), p(20)).unwrap();
        feed.create_post(u(1), p(10)).unwrap();

        let authors: Vec<UserId> = feed.feed_posts(u(1)).map(|post| post.author).collect();
        assert_eq!(authors, vec![u(1), u(2)]);
    }
}
