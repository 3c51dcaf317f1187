//! Feed merge: k-way merge of followed users' post stores.
//!
//! Every post store is already ordered newest first, so the newest post of
//! the whole feed is the newest head among the followed stores. The merge
//! keeps one entry per non-exhausted store in a max-heap keyed by sequence
//! number:
//!
//! 1. Seed the heap with the newest post of each followed store.
//! 2. Pop the globally newest entry and emit it.
//! 3. If that post has an older neighbour in its store, push the neighbour.
//!
//! The heap never holds more than F entries (F = followed users with posts),
//! so producing N posts costs O((F + N) log F) no matter how many posts the
//! stores hold in total.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use newsfeed_core::{Cursor, Post, PostId, Seq, UserId};
use tracing::trace;

use crate::registry::FeedSource;

/// A store's current head inside the merge heap.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    seq: Seq,
    author: UserId,
    cursor: Cursor,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Newest first. Equal sequence numbers cannot come from one clock;
        // the author tie-break only keeps the order deterministic.
        self.seq
            .cmp(&other.seq)
            .then_with(|| other.author.cmp(&self.author))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy newest-first merge over everything `user` follows.
///
/// Yields posts one at a time; take only what you need. An unknown user
/// produces an empty merge.
pub struct FeedMerge<'a, S: FeedSource + ?Sized> {
    source: &'a S,
    heap: BinaryHeap<HeapEntry>,
}

impl<'a, S: FeedSource + ?Sized> FeedMerge<'a, S> {
    /// Seed a merge for `user`.
    pub fn new(source: &'a S, user: UserId) -> Self {
        let heap: BinaryHeap<HeapEntry> = match source.follow_set(user) {
            Some(follows) => follows
                .iter()
                .filter_map(|followee| {
                    let store = source.post_store(followee)?;
                    let cursor = store.newest()?;
                    let post = store.get(cursor)?;
                    Some(HeapEntry {
                        seq: post.seq,
                        author: followee,
                        cursor,
                    })
                })
                .collect(),
            None => BinaryHeap::new(),
        };

        trace!(%user, sources = heap.len(), "seeded feed merge");
        Self { source, heap }
    }

    fn advance(&mut self, entry: HeapEntry) -> Option<Post> {
        let store = self.source.post_store(entry.author)?;
        let post = *store.get(entry.cursor)?;

        if let Some(older) = store.older(entry.cursor) {
            if let Some(next) = store.get(older) {
                self.heap.push(HeapEntry {
                    seq: next.seq,
                    author: entry.author,
                    cursor: older,
                });
            }
        }

        Some(post)
    }
}

impl<S: FeedSource + ?Sized> Iterator for FeedMerge<'_, S> {
    type Item = Post;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.heap.pop() {
            // A source that changed under us is impossible through a shared
            // borrow; skip rather than end the feed if one ever does.
            if let Some(post) = self.advance(entry) {
                trace!(post = %post.id, seq = %post.seq, "merged post");
                return Some(post);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every entry still in the heap yields at least one post.
        (self.heap.len(), None)
    }
}

/// The `limit` newest post ids reachable from `user`.
pub fn top_posts<S: FeedSource + ?Sized>(source: &S, user: UserId, limit: usize) -> Vec<PostId> {
    FeedMerge::new(source, user)
        .take(limit)
        .map(|post| post.id)
        .collect()
}

/// One page of the full merged feed of `user`.
///
/// Returns the zero-based slice `[page * page_size, page * page_size +
/// page_size)` clipped to the feed length, or nothing if that range is
/// empty or cannot be represented.
pub fn page_posts<S: FeedSource + ?Sized>(
    source: &S,
    user: UserId,
    page: usize,
    page_size: usize,
) -> Vec<PostId> {
    let Some(start) = page.checked_mul(page_size) else {
        return Vec::new();
    };
    if page_size == 0 {
        return Vec::new();
    }

    FeedMerge::new(source, user)
        .skip(start)
        .take(page_size)
        .map(|post| post.id)
        .collect()
}
