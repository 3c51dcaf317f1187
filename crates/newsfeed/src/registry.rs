//! User registry: the single owner of every user record.
//!
//! Users are never registered explicitly. The first mutating reference to a
//! user id provisions an empty record through [`UserRegistry::get_or_create`],
//! and no other code path creates users. Records are never removed.

use std::collections::HashMap;

use newsfeed_core::{FollowSet, PostStore, UserId};
use tracing::debug;

/// Read access to follow sets and post stores.
///
/// This is the seam the feed merge reads through. It never mutates.
pub trait FeedSource {
    /// The follow set of `user`, if the user is known.
    fn follow_set(&self, user: UserId) -> Option<&FollowSet>;

    /// The post store of `user`, if the user is known.
    fn post_store(&self, user: UserId) -> Option<&PostStore>;
}

/// Everything the service keeps about one user.
#[derive(Debug, Clone)]
pub struct UserRecord {
    id: UserId,
    follows: FollowSet,
    posts: PostStore,
}

impl UserRecord {
    fn new(id: UserId) -> Self {
        Self {
            id,
            follows: FollowSet::new(id),
            posts: PostStore::new(id),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn follows(&self) -> &FollowSet {
        &self.follows
    }

    pub fn posts(&self) -> &PostStore {
        &self.posts
    }

    pub(crate) fn follows_mut(&mut self) -> &mut FollowSet {
        &mut self.follows
    }

    pub(crate) fn posts_mut(&mut self) -> &mut PostStore {
        &mut self.posts
    }
}

/// Map from user id to user record.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<UserId, UserRecord>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for `user`, provisioning an empty one on first use.
    pub fn get_or_create(&mut self, user: UserId) -> &mut UserRecord {
        self.users.entry(user).or_insert_with(|| {
            debug!(%user, "provisioned user");
            UserRecord::new(user)
        })
    }

    /// Get the record for `user` without provisioning.
    pub fn get(&self, user: UserId) -> Option<&UserRecord> {
        self.users.get(&user)
    }

    /// Whether `user` has a record.
    pub fn contains(&self, user: UserId) -> bool {
        self.users.contains_key(&user)
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no user has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate known user ids in unspecified order.
    pub fn user_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }
}

impl FeedSource for UserRegistry {
    fn follow_set(&self, user: UserId) -> Option<&FollowSet> {
        self.get(user).map(UserRecord::follows)
    }

    fn post_store(&self, user: UserId) -> Option<&PostStore> {
        self.get(user).map(UserRecord::posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsfeed_core::{PostId, SequenceClock};

    #[test]
    fn test_get_or_create_provisions_once() {
        let mut registry = UserRegistry::new();
        let clock = SequenceClock::new();

        registry
            .get_or_create(UserId::new(1))
            .posts_mut()
            .create(PostId::new(10), &clock)
            .unwrap();

        // Second reference sees the same record.
        let record = registry.get_or_create(UserId::new(1));
        assert_eq!(record.posts().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_new_record_follows_itself() {
        let mut registry = UserRegistry::new();
        let record = registry.get_or_create(UserId::new(3));
        assert_eq!(record.id(), UserId::new(3));
        assert!(record.follows().contains(UserId::new(3)));
        assert!(record.posts().is_empty());
    }

    #[test]
    fn test_get_does_not_provision() {
        let registry = UserRegistry::new();
        assert!(registry.get(UserId::new(1)).is_none());
        assert!(registry.follow_set(UserId::new(1)).is_none());
        assert!(registry.post_store(UserId::new(1)).is_none());
        assert!(registry.is_empty());
    }
}
