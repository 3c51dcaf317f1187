//! Golden scenarios with known feeds.
//!
//! Each vector is a script of operations interleaved with expectations.
//! Vectors serialize to JSON so other front ends can replay the exact same
//! scenarios.

use serde::{Deserialize, Serialize};

use newsfeed::{NewsFeed, NewsFeedConfig, PostId, UserId};

use crate::fixtures::raw;
use crate::generators::{apply_op, Op};

/// One step of a golden scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Apply an operation that must be accepted.
    Apply(Op),
    /// Apply an operation that must be rejected.
    Reject(Op),
    /// The default-size feed of `user` must equal `posts`.
    ExpectFeed { user: u64, posts: Vec<u64> },
    /// Page `page` of the feed of `user` must equal `posts`.
    ExpectPage { user: u64, page: usize, posts: Vec<u64> },
}

/// A golden scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: String,
    /// Service configuration to run under.
    #[serde(default)]
    pub config: NewsFeedConfig,
    /// Script to replay.
    pub steps: Vec<Step>,
}

/// Why a vector failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorFailure {
    /// Index of the failing step.
    pub step: usize,
    /// What went wrong.
    pub message: String,
}

fn follow(user: u64, target: u64) -> Step {
    Step::Apply(Op::Follow { user, target })
}

fn unfollow(user: u64, target: u64) -> Step {
    Step::Apply(Op::Unfollow { user, target })
}

fn post(user: u64, post: u64) -> Step {
    Step::Apply(Op::Post { user, post })
}

fn delete(user: u64, post: u64) -> Step {
    Step::Apply(Op::Delete { user, post })
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let mut thirteen = Vec::new();
    thirteen.extend((2..=13).map(|target| follow(1, target)));
    thirteen.push(post(1, 1000));
    thirteen.extend((2..=13).map(|user| post(user, 1000 + user)));
    thirteen.extend([
        Step::ExpectFeed {
            user: 1,
            posts: (1004..=1013).rev().collect(),
        },
        unfollow(1, 13),
        Step::ExpectFeed {
            user: 1,
            posts: (1003..=1012).rev().collect(),
        },
        delete(12, 1012),
        Step::ExpectFeed {
            user: 1,
            posts: (1002..=1011).rev().collect(),
        },
        Step::ExpectPage {
            user: 1,
            page: 2,
            posts: vec![1007, 1006],
        },
        Step::ExpectPage {
            user: 1,
            page: 5,
            posts: vec![1000],
        },
        Step::ExpectPage {
            user: 1,
            page: 6,
            posts: vec![],
        },
    ]);

    vec![
        GoldenVector {
            name: "thirteen users, unfollow, delete, paginate".into(),
            config: NewsFeedConfig::default(),
            steps: thirteen,
        },
        GoldenVector {
            name: "self follow survives unfollow".into(),
            config: NewsFeedConfig::default(),
            steps: vec![
                post(1, 1),
                unfollow(1, 1),
                Step::ExpectFeed {
                    user: 1,
                    posts: vec![1],
                },
            ],
        },
        GoldenVector {
            name: "duplicate post id rejected per author".into(),
            config: NewsFeedConfig::default(),
            steps: vec![
                post(1, 5),
                Step::Reject(Op::Post { user: 1, post: 5 }),
                post(2, 5),
                follow(1, 2),
                Step::ExpectFeed {
                    user: 1,
                    posts: vec![5, 5],
                },
            ],
        },
        GoldenVector {
            name: "unknown user has empty feed".into(),
            config: NewsFeedConfig::default(),
            steps: vec![
                Step::ExpectFeed {
                    user: 99,
                    posts: vec![],
                },
                Step::ExpectPage {
                    user: 99,
                    page: 0,
                    posts: vec![],
                },
            ],
        },
        GoldenVector {
            name: "delete then repost moves to front".into(),
            config: NewsFeedConfig {
                feed_size: 3,
                page_size: 1,
            },
            steps: vec![
                post(1, 1),
                post(1, 2),
                post(1, 3),
                delete(1, 1),
                post(1, 1),
                Step::ExpectFeed {
                    user: 1,
                    posts: vec![1, 3, 2],
                },
                Step::ExpectPage {
                    user: 1,
                    page: 2,
                    posts: vec![2],
                },
            ],
        },
    ]
}

/// Replay a vector against a fresh service.
pub fn run_vector(vector: &GoldenVector) -> Result<(), VectorFailure> {
    let fail = |step: usize, message: String| Err(VectorFailure { step, message });

    let mut feed = match NewsFeed::with_config(vector.config) {
        Ok(feed) => feed,
        Err(e) => return fail(0, e.to_string()),
    };

    for (i, step) in vector.steps.iter().enumerate() {
        match step {
            Step::Apply(op) => {
                if !apply_op(&mut feed, op) {
                    return fail(i, format!("{op:?} was rejected"));
                }
            }
            Step::Reject(op) => {
                if apply_op(&mut feed, op) {
                    return fail(i, format!("{op:?} was accepted"));
                }
            }
            Step::ExpectFeed { user, posts } => {
                let got = raw(feed.feed(UserId::new(*user)));
                if &got != posts {
                    return fail(i, format!("feed of {user}: expected {posts:?}, got {got:?}"));
                }
            }
            Step::ExpectPage { user, page, posts } => {
                let got = raw(feed.feed_page(UserId::new(*user), *page));
                if &got != posts {
                    return fail(
                        i,
                        format!("page {page} of {user}: expected {posts:?}, got {got:?}"),
                    );
                }
            }
        }
    }
    Ok(())
}

/// Run all golden vectors.
///
/// Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match run_vector(v) {
            Ok(()) => (v.name.clone(), true, String::new()),
            Err(f) => (v.name.clone(), false, format!("step {}: {}", f.step, f.message)),
        })
        .collect()
}

/// Post ids of a vector's final feed for `user`, for callers that want to
/// inspect state after a replay.
pub fn replay_feed(vector: &GoldenVector, user: u64) -> Option<Vec<PostId>> {
    let mut feed = NewsFeed::with_config(vector.config).ok()?;
    for step in &vector.steps {
        if let Step::Apply(op) | Step::Reject(op) = step {
            apply_op(&mut feed, op);
        }
    }
    Some(feed.feed(UserId::new(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_pass() {
        for (name, passed, detail) in verify_all_vectors() {
            assert!(passed, "vector '{}' failed: {}", name, detail);
        }
    }

    #[test]
    fn test_vectors_roundtrip_json() {
        for vector in all_vectors() {
            let json = serde_json::to_string(&vector).unwrap();
            let back: GoldenVector = serde_json::from_str(&json).unwrap();
            assert_eq!(back, vector);
        }
    }

    #[test]
    fn test_vector_from_json_defaults_config() {
        let json = r#"{
            "name": "json",
            "steps": [
                {"apply": {"post": {"user": 1, "post": 9}}},
                {"expect_feed": {"user": 1, "posts": [9]}}
            ]
        }"#;
        let vector: GoldenVector = serde_json::from_str(json).unwrap();
        assert_eq!(vector.config, NewsFeedConfig::default());
        assert_eq!(run_vector(&vector), Ok(()));
    }

    #[test]
    fn test_failing_vector_reports_step() {
        let vector = GoldenVector {
            name: "wrong".into(),
            config: NewsFeedConfig::default(),
            steps: vec![
                post(1, 1),
                Step::ExpectFeed {
                    user: 1,
                    posts: vec![2],
                },
            ],
        };
        let failure = run_vector(&vector).unwrap_err();
        assert_eq!(failure.step, 1);
    }

    #[test]
    fn test_replay_feed() {
        let vectors = all_vectors();
        let feed = replay_feed(&vectors[0], 1).unwrap();
        assert_eq!(feed.first(), Some(&PostId::new(1011)));
    }
}
