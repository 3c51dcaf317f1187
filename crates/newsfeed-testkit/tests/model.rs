//! Model-based tests: the service against the naive reference model.

use proptest::prelude::*;

use newsfeed::{NewsFeed, UserId};
use newsfeed_testkit::generators::{apply_op, op_script, post_id, user_id, ReferenceModel};
use newsfeed_testkit::{fixtures::raw, Op};

const USERS: u64 = 6;

fn replay(ops: &[Op]) -> (NewsFeed, ReferenceModel) {
    let mut feed = NewsFeed::new();
    let mut model = ReferenceModel::new();
    for op in ops {
        apply_op(&mut feed, op);
        model.apply(op);
    }
    (feed, model)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_feed_matches_model(ops in op_script(USERS, 12, 150), limit in 0usize..25) {
        let (feed, model) = replay(&ops);

        for user in 0..USERS {
            prop_assert_eq!(
                raw(feed.feed_with_size(UserId::new(user), limit)),
                model.feed(user, limit)
            );
        }
    }

    #[test]
    fn test_pages_match_model(ops in op_script(USERS, 12, 150), page in 0usize..10, size in 0usize..5) {
        let (feed, model) = replay(&ops);

        for user in 0..USERS {
            prop_assert_eq!(
                raw(feed.feed_page_with_size(UserId::new(user), page, size)),
                model.page(user, page, size)
            );
        }
    }

    #[test]
    fn test_own_posts_always_visible(ops in op_script(USERS, 12, 150), user in user_id(USERS), post in post_id(1000)) {
        let (mut feed, _) = replay(&ops);
        let post = newsfeed::PostId::new(post.get() + 10_000);

        feed.create_post(user, post).unwrap();
        prop_assert_eq!(feed.feed_with_size(user, 1), vec![post]);
    }
}

#[test]
fn test_model_agrees_on_scripted_history() {
    let ops = [
        Op::Follow { user: 1, target: 2 },
        Op::Post { user: 2, post: 7 },
        Op::Post { user: 1, post: 7 },
        Op::Unfollow { user: 1, target: 1 },
        Op::Delete { user: 2, post: 7 },
        Op::Post { user: 2, post: 8 },
    ];
    let (feed, model) = replay(&ops);

    assert_eq!(raw(feed.feed(UserId::new(1))), vec![8, 7]);
    assert_eq!(model.feed(1, 10), vec![8, 7]);
}
