//! Thread-safe handle to a [`NewsFeed`].
//!
//! One `RwLock` serializes all access: feed reads share the lock, mutations
//! take it exclusively. Every operation finishes its critical section with
//! the service in a consistent state, so a poisoned lock is recovered
//! rather than propagated.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use newsfeed_core::{Post, PostId, UserId};

use crate::config::NewsFeedConfig;
use crate::error::Result;
use crate::service::NewsFeed;
use crate::view::{FeedPageView, FeedView};

/// Cloneable, `Send + Sync` handle to a shared [`NewsFeed`].
#[derive(Debug, Clone, Default)]
pub struct SharedNewsFeed {
    inner: Arc<RwLock<NewsFeed>>,
}

impl SharedNewsFeed {
    /// Wrap an existing service.
    pub fn new(feed: NewsFeed) -> Self {
        Self {
            inner: Arc::new(RwLock::new(feed)),
        }
    }

    /// Create a shared service with a validated configuration.
    pub fn with_config(config: NewsFeedConfig) -> Result<Self> {
        Ok(Self::new(NewsFeed::with_config(config)?))
    }

    fn read(&self) -> RwLockReadGuard<'_, NewsFeed> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, NewsFeed> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with shared access to the service.
    pub fn with_read<R>(&self, f: impl FnOnce(&NewsFeed) -> R) -> R {
        f(&*self.read())
    }

    pub fn create_post(&self, user: UserId, post: PostId) -> Result<Post> {
        self.write().create_post(user, post)
    }

    pub fn delete_post(&self, user: UserId, post: PostId) -> Option<Post> {
        self.write().delete_post(user, post)
    }

    pub fn follow(&self, user: UserId, target: UserId) -> bool {
        self.write().follow(user, target)
    }

    pub fn unfollow(&self, user: UserId, target: UserId) -> bool {
        self.write().unfollow(user, target)
    }

    pub fn feed(&self, user: UserId) -> Vec<PostId> {
        self.read().feed(user)
    }

    pub fn feed_with_size(&self, user: UserId, limit: usize) -> Vec<PostId> {
        self.read().feed_with_size(user, limit)
    }

    pub fn feed_page(&self, user: UserId, page: usize) -> Vec<PostId> {
        self.read().feed_page(user, page)
    }

    pub fn feed_page_with_size(&self, user: UserId, page: usize, page_size: usize) -> Vec<PostId> {
        self.read().feed_page_with_size(user, page, page_size)
    }

    pub fn feed_view(&self, user: UserId) -> FeedView {
        self.read().feed_view(user)
    }

    pub fn feed_page_view(&self, user: UserId, page: usize) -> Option<FeedPageView> {
        self.read().feed_page_view(user, page)
    }

    pub fn user_count(&self) -> usize {
        self.read().user_count()
    }
}

impl From<NewsFeed> for SharedNewsFeed {
    fn from(feed: NewsFeed) -> Self {
        Self::new(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_handle_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedNewsFeed>();
    }

    #[test]
    fn test_concurrent_writers_keep_order() {
        let shared = SharedNewsFeed::new(NewsFeed::new());
        for author in 2..=5 {
            shared.follow(UserId::new(1), UserId::new(author));
        }

        let handles: Vec<_> = (2..=5u64)
            .map(|author| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for n in 0..50 {
                        shared
                            .create_post(UserId::new(author), PostId::new(author * 1000 + n))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let seqs: Vec<_> = shared.with_read(|feed| {
            feed.feed_posts(UserId::new(1))
                .map(|post| post.seq)
                .collect()
        });
        assert_eq!(seqs.len(), 200);
        assert!(seqs.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_readers_see_writes() {
        let shared = SharedNewsFeed::default();
        shared.create_post(UserId::new(1), PostId::new(1)).unwrap();

        let reader = shared.clone();
        let feed = thread::spawn(move || reader.feed(UserId::new(1)))
            .join()
            .unwrap();
        assert_eq!(feed, vec![PostId::new(1)]);
    }
}
