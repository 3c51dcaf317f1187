//! # Newsfeed Testkit
//!
//! Testing utilities for newsfeed.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Scripted scenarios with known feeds
//! - **Generators**: Proptest strategies and a naive reference model
//! - **Fixtures**: Helper structs for setting up follow graphs
//!
//! ## Golden Vectors
//!
//! ```rust
//! use newsfeed_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use newsfeed::NewsFeed;
//! use newsfeed_testkit::generators::{apply_op, op_script, ReferenceModel};
//!
//! proptest! {
//!     #[test]
//!     fn feed_matches_model(ops in op_script(5, 10, 100)) {
//!         let mut feed = NewsFeed::new();
//!         let mut model = ReferenceModel::new();
//!         for op in &ops {
//!             apply_op(&mut feed, op);
//!             model.apply(op);
//!         }
//!         // compare feeds ...
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use newsfeed_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::new();
//! fixture.follow_all(1, [2, 3]).post(2, 20).post(3, 30);
//! assert_eq!(fixture.feed_ids(1), vec![30, 20]);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fan_in, TestFixture};
pub use generators::{apply_op, apply_ops, op_script, Op, ReferenceModel};
pub use vectors::{all_vectors, run_vector, verify_all_vectors, GoldenVector, Step};
