//! Proptest generators for property-based testing.
//!
//! Besides strategies for identifiers and operation scripts, this module
//! carries [`ReferenceModel`], a deliberately naive re-implementation of the
//! service that computes feeds by sorting every reachable post. Property
//! tests drive both with the same script and compare.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use newsfeed::{NewsFeed, PostId, UserId};

/// Generate a UserId from a small pool so scripts hit the same users often.
pub fn user_id(pool: u64) -> impl Strategy<Value = UserId> {
    (0..pool.max(1)).prop_map(UserId::new)
}

/// Generate a PostId from a small pool so duplicates and deletes of live
/// posts actually happen.
pub fn post_id(pool: u64) -> impl Strategy<Value = PostId> {
    (0..pool.max(1)).prop_map(PostId::new)
}

/// One mutating call against the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Post { user: u64, post: u64 },
    Delete { user: u64, post: u64 },
    Follow { user: u64, target: u64 },
    Unfollow { user: u64, target: u64 },
}

/// Generate an operation over `users` users and `posts` post ids.
pub fn op(users: u64, posts: u64) -> impl Strategy<Value = Op> {
    let users = users.max(1);
    let posts = posts.max(1);
    prop_oneof![
        4 => (0..users, 0..posts).prop_map(|(user, post)| Op::Post { user, post }),
        1 => (0..users, 0..posts).prop_map(|(user, post)| Op::Delete { user, post }),
        2 => (0..users, 0..users).prop_map(|(user, target)| Op::Follow { user, target }),
        1 => (0..users, 0..users).prop_map(|(user, target)| Op::Unfollow { user, target }),
    ]
}

/// Generate an operation script of up to `max_len` operations.
pub fn op_script(users: u64, posts: u64, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(users, posts), 0..=max_len)
}

impl Arbitrary for Op {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        op(8, 16).boxed()
    }
}

/// Apply one operation. Returns `false` if the service rejected it.
pub fn apply_op(feed: &mut NewsFeed, op: &Op) -> bool {
    match *op {
        Op::Post { user, post } => feed
            .create_post(UserId::new(user), PostId::new(post))
            .is_ok(),
        Op::Delete { user, post } => {
            feed.delete_post(UserId::new(user), PostId::new(post));
            true
        }
        Op::Follow { user, target } => {
            feed.follow(UserId::new(user), UserId::new(target));
            true
        }
        Op::Unfollow { user, target } => {
            feed.unfollow(UserId::new(user), UserId::new(target));
            true
        }
    }
}

/// Apply a script. Returns how many operations were rejected.
pub fn apply_ops(feed: &mut NewsFeed, ops: &[Op]) -> usize {
    ops.iter().filter(|op| !apply_op(feed, op)).count()
}

#[derive(Debug, Clone)]
struct ModelUser {
    follows: BTreeSet<u64>,
    /// `(seq, post)`, oldest first.
    posts: Vec<(u64, u64)>,
}

/// Naive oracle for the service.
///
/// Keeps every user's posts in a plain vector and answers feed queries by
/// collecting and sorting everything reachable.
#[derive(Debug, Clone, Default)]
pub struct ReferenceModel {
    users: BTreeMap<u64, ModelUser>,
    clock: u64,
}

impl ReferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn user(&mut self, id: u64) -> &mut ModelUser {
        self.users.entry(id).or_insert_with(|| ModelUser {
            follows: BTreeSet::from([id]),
            posts: Vec::new(),
        })
    }

    /// Apply one operation. Returns `false` if it would be rejected.
    pub fn apply(&mut self, op: &Op) -> bool {
        match *op {
            Op::Post { user, post } => {
                if self.user(user).posts.iter().any(|&(_, p)| p == post) {
                    return false;
                }
                self.clock += 1;
                let seq = self.clock;
                self.user(user).posts.push((seq, post));
            }
            Op::Delete { user, post } => {
                self.user(user).posts.retain(|&(_, p)| p != post);
            }
            Op::Follow { user, target } => {
                self.user(target);
                self.user(user).follows.insert(target);
            }
            Op::Unfollow { user, target } => {
                self.user(target);
                if user != target {
                    self.user(user).follows.remove(&target);
                }
            }
        }
        true
    }

    /// Every post reachable from `user`, newest first.
    pub fn full_feed(&self, user: u64) -> Vec<u64> {
        let Some(record) = self.users.get(&user) else {
            return Vec::new();
        };
        let mut posts: Vec<(u64, u64)> = record
            .follows
            .iter()
            .filter_map(|followee| self.users.get(followee))
            .flat_map(|followee| followee.posts.iter().copied())
            .collect();
        posts.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        posts.into_iter().map(|(_, post)| post).collect()
    }

    /// The newest `limit` posts reachable from `user`.
    pub fn feed(&self, user: u64, limit: usize) -> Vec<u64> {
        let mut feed = self.full_feed(user);
        feed.truncate(limit);
        feed
    }

    /// A page of the full feed, sliced the same way the service slices it.
    pub fn page(&self, user: u64, page: usize, page_size: usize) -> Vec<u64> {
        let feed = self.full_feed(user);
        let Some(start) = page.checked_mul(page_size) else {
            return Vec::new();
        };
        let end = start.saturating_add(page_size).min(feed.len());
        if start >= end {
            return Vec::new();
        }
        feed[start..end].to_vec()
    }

    /// Number of users referenced so far.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_rejects_duplicate() {
        let mut model = ReferenceModel::new();
        assert!(model.apply(&Op::Post { user: 1, post: 1 }));
        assert!(!model.apply(&Op::Post { user: 1, post: 1 }));
        assert_eq!(model.full_feed(1), vec![1]);
    }

    #[test]
    fn test_model_page_slicing() {
        let mut model = ReferenceModel::new();
        for post in 1..=5 {
            model.apply(&Op::Post { user: 1, post });
        }
        assert_eq!(model.page(1, 1, 2), vec![3, 2]);
        assert_eq!(model.page(1, 2, 2), vec![1]);
        assert!(model.page(1, 3, 2).is_empty());
        assert!(model.page(1, 0, 0).is_empty());
    }

    #[test]
    fn test_op_serializes_snake_case() {
        let json = serde_json::to_string(&Op::Follow { user: 1, target: 2 }).unwrap();
        assert_eq!(json, r#"{"follow":{"user":1,"target":2}}"#);
    }

    proptest! {
        #[test]
        fn test_service_and_model_agree_on_rejections(ops in op_script(4, 6, 80)) {
            let mut feed = NewsFeed::new();
            let mut model = ReferenceModel::new();

            for op in &ops {
                prop_assert_eq!(apply_op(&mut feed, op), model.apply(op));
            }
            prop_assert_eq!(feed.user_count(), model.user_count());
        }

        #[test]
        fn test_arbitrary_ops_apply(ops: Vec<Op>) {
            let mut feed = NewsFeed::new();
            let rejected = apply_ops(&mut feed, &ops);
            prop_assert!(rejected <= ops.len());
        }
    }
}
