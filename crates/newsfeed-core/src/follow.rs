//! Follow sets: who a user follows.

use std::collections::HashSet;

use tracing::debug;

use crate::types::UserId;

/// The set of users whose posts are eligible for one user's feed.
///
/// The owner is always a member. Iteration order is unspecified; nothing
/// built on top of a follow set may depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSet {
    owner: UserId,
    followees: HashSet<UserId>,
}

impl FollowSet {
    /// Create a follow set containing only `owner`.
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            followees: HashSet::from([owner]),
        }
    }

    /// The user this follow set belongs to.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Follow `target`. Returns whether the set changed.
    pub fn follow(&mut self, target: UserId) -> bool {
        let added = self.followees.insert(target);
        if added {
            debug!(user = %self.owner, %target, "followed");
        }
        added
    }

    /// Unfollow `target`. Returns whether the set changed.
    ///
    /// The owner cannot be removed: unfollowing oneself is a no-op.
    pub fn unfollow(&mut self, target: UserId) -> bool {
        if target == self.owner {
            debug!(user = %self.owner, "ignored self-unfollow");
            return false;
        }
        let removed = self.followees.remove(&target);
        if removed {
            debug!(user = %self.owner, %target, "unfollowed");
        }
        removed
    }

    /// Whether `target` is followed.
    pub fn contains(&self, target: UserId) -> bool {
        self.followees.contains(&target)
    }

    /// Number of followed users, the owner included.
    pub fn len(&self) -> usize {
        self.followees.len()
    }

    /// Always false: the owner is a member. Provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.followees.is_empty()
    }

    /// Iterate followed users in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.followees.iter().copied()
    }
}
