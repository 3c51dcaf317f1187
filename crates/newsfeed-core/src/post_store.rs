//! Post store: one user's posts, newest first.
//!
//! The store is a doubly linked list laid out in an arena. Nodes live in a
//! `Vec` and link to each other by slot index, with two sentinel slots
//! bounding the list:
//!
//! ```text
//!  HEAD <-> newest <-> ... <-> oldest <-> TAIL
//! ```
//!
//! Insertion always happens right after `HEAD`, so the list order is the
//! reverse creation order. A side index from [`PostId`] to slot gives O(1)
//! delete-by-id. Freed slots go on a free list and are reused by later
//! inserts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::SequenceClock;
use crate::error::{CoreError, Result};
use crate::types::{PostId, Seq, UserId};

const HEAD: usize = 0;
const TAIL: usize = 1;

/// A live post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Post {
    /// Caller-supplied identifier.
    pub id: PostId,
    /// The user whose store owns this post.
    pub author: UserId,
    /// Creation sequence number.
    pub seq: Seq,
}

/// Position of a live post inside a [`PostStore`].
///
/// A cursor is only meaningful for the store that produced it, and only
/// until that store is next mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(usize);

#[derive(Debug, Clone)]
struct Node {
    /// `None` for the sentinels and for free slots.
    post: Option<Post>,
    prev: usize,
    next: usize,
}

impl Node {
    const fn sentinel() -> Self {
        Self {
            post: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// One user's posts in strict reverse-chronological order.
#[derive(Debug, Clone)]
pub struct PostStore {
    owner: UserId,
    nodes: Vec<Node>,
    free: Vec<usize>,
    index: HashMap<PostId, usize>,
}

impl PostStore {
    /// Create an empty store for `owner`.
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            nodes: vec![Node::sentinel(), Node::sentinel()],
            free: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The user this store belongs to.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Number of live posts.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no posts.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether a live post with this id exists.
    pub fn contains(&self, id: PostId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a live post by id.
    pub fn get_by_id(&self, id: PostId) -> Option<&Post> {
        let slot = *self.index.get(&id)?;
        self.nodes[slot].post.as_ref()
    }

    /// Create a post as the new newest entry.
    ///
    /// A sequence number is drawn from `clock` only once the id has been
    /// accepted, so a rejected create leaves both the store and the clock
    /// untouched.
    ///
    /// # Errors
    /// [`CoreError::DuplicatePost`] if `id` is already live in this store.
    pub fn create(&mut self, id: PostId, clock: &SequenceClock) -> Result<Post> {
        if self.index.contains_key(&id) {
            warn!(author = %self.owner, post = %id, "rejected duplicate post id");
            return Err(CoreError::DuplicatePost {
                author: self.owner,
                post: id,
            });
        }

        let post = Post {
            id,
            author: self.owner,
            seq: clock.tick(),
        };

        let first = self.nodes[HEAD].next;
        debug_assert!(
            self.nodes[first].post.map_or(true, |newest| newest.seq < post.seq),
            "sequence numbers must grow within a store"
        );

        let node = Node {
            post: Some(post),
            prev: HEAD,
            next: first,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.nodes[HEAD].next = slot;
        self.nodes[first].prev = slot;
        self.index.insert(id, slot);

        debug!(author = %self.owner, post = %id, seq = %post.seq, "created post");
        Ok(post)
    }

    /// Remove a post by id.
    ///
    /// Returns the removed post, or `None` if no such post was live.
    pub fn delete(&mut self, id: PostId) -> Option<Post> {
        let slot = self.index.remove(&id)?;

        let Node { post, prev, next } = std::mem::replace(&mut self.nodes[slot], Node::sentinel());
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(slot);

        debug!(author = %self.owner, post = %id, "deleted post");
        post
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cursor traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Cursor at the newest post, or `None` if the store is empty.
    pub fn newest(&self) -> Option<Cursor> {
        self.live(self.nodes[HEAD].next)
    }

    /// The post under a cursor.
    pub fn get(&self, cursor: Cursor) -> Option<&Post> {
        self.nodes.get(cursor.0).and_then(|node| node.post.as_ref())
    }

    /// Cursor at the next older post, or `None` once the tail is reached.
    pub fn older(&self, cursor: Cursor) -> Option<Cursor> {
        let node = self.nodes.get(cursor.0)?;
        node.post.as_ref()?;
        self.live(node.next)
    }

    fn live(&self, slot: usize) -> Option<Cursor> {
        (slot != TAIL).then_some(Cursor(slot))
    }

    /// Iterate posts from newest to oldest.
    ///
    /// The iterator is lazy; dropping it early costs nothing, and calling
    /// `iter` again restarts from the newest post.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.newest(),
        }
    }
}

impl<'a> IntoIterator for &'a PostStore {
    type Item = &'a Post;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Newest-first iterator over a [`PostStore`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    store: &'a PostStore,
    cursor: Option<Cursor>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Post;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        self.cursor = self.store.older(cursor);
        self.store.get(cursor)
    }
}
