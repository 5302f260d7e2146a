// =====================================================================
// File: integration_store.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 16, 2026
//
// Description:
//   Integration tests for the Witter index store. These go through the
//   public crate surface only:
//
//   - The three store facades, driven together the way a session does
//   - Listing/cache behaviour across interleaved inserts and reads
//   - Property checks over random insert orders (tree invariants,
//     join-date cuts, follow ordering)
//   - A scripted REPL run, checked line by line
// =====================================================================
use std::rc::Rc;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use witterstore::index::{RbTree, TraversalOrder};
use witterstore::{
    run_repl, Config, FollowGraphStore, Session, Timestamp, User, UserIndexStore, Weet,
    WeetIndexStore,
};

/// Jan `d`, 2026 at noon.
fn jan(d: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

fn user_ids(users: &[Rc<User>]) -> Vec<u64> {
    users.iter().map(|u| u.id()).collect()
}

fn weet_ids(weets: &[Rc<Weet>]) -> Vec<u64> {
    weets.iter().map(|w| w.id()).collect()
}


#[test]
fn test_users_scenario_listing_and_cut() {
    let mut users = UserIndexStore::new();
    for id in 1..=5u64 {
        assert!(users.add_user(User::new(id, format!("user{id}"), jan(id as u32))));
    }

    assert_eq!(user_ids(users.list_users()), vec![5, 4, 3, 2, 1]);
    assert_eq!(user_ids(&users.users_joined_before(jan(3))), vec![3, 2, 1]);
}

#[test]
fn test_listing_cache_across_interleaved_writes() {
    let mut users = UserIndexStore::new();
    let mut expected = Vec::new();

    // Join dates out of order; every read must still be sorted
    for (step, day) in [4u32, 1, 9, 2, 7, 3].into_iter().enumerate() {
        let id = step as u64 + 1;
        users.add_user(User::new(id, "u", jan(day)));
        expected.push((day, id));
        expected.sort_by(|a, b| b.cmp(a));

        let first = user_ids(users.list_users());
        let again = user_ids(users.list_users());
        assert_eq!(first, again);
        assert_eq!(first, expected.iter().map(|(_, id)| *id).collect::<Vec<_>>());
    }
}

#[test]
fn test_follower_count_scenario() {
    let mut graph = FollowGraphStore::new();
    graph.add_edge(1, 3, jan(1));
    graph.add_edge(2, 3, jan(2));
    graph.add_edge(4, 3, jan(3));
    graph.add_edge(5, 3, jan(4));

    assert_eq!(graph.follower_count(3), 4);
    assert_eq!(graph.get_followers(3), vec![5, 4, 2, 1]);
    assert_eq!(graph.top_users_by_followers()[0], 3);
}

#[test]
fn test_trending_scenario() {
    let mut weets = WeetIndexStore::new();
    weets.add_weet(Weet::new(1, 1, "#a #a #b", jan(1)));

    let trending = weets.trending();
    assert_eq!(trending, vec!["#a".to_string(), "#b".to_string()]);
    assert_eq!(weets.trend_count("#a"), 2);
}

#[test]
fn test_weet_filters_share_listing_order() {
    let mut weets = WeetIndexStore::new();
    for (id, day, text) in [
        (1u64, 3u32, "morning run"),
        (2, 1, "Run club"),
        (3, 2, "rest day"),
        (4, 3, "evening RUN"),
    ] {
        weets.add_weet(Weet::new(id, id % 2, text, jan(day)));
    }

    let listed = weet_ids(weets.list_weets());
    assert_eq!(listed, vec![4, 1, 3, 2]);
    assert_eq!(weet_ids(&weets.weets_containing("run")), vec![4, 1, 2]);
    assert_eq!(weet_ids(&weets.weets_on(jan(3).date())), vec![4, 1]);
    assert_eq!(weet_ids(&weets.weets_before(jan(2))), vec![3, 2]);
    assert_eq!(weet_ids(&weets.weets_by_user(0)), vec![4, 2]);
}

#[test]
fn test_session_stores_work_together() {
    let mut session = Session::new();
    for id in 1..=3u64 {
        session.users.add_user(User::new(id, format!("member {id}"), jan(id as u32)));
    }
    session.follows.add_edge(2, 1, jan(5));
    session.follows.add_edge(3, 1, jan(6));
    session.weets.add_weet(Weet::new(100, 1, "welcome #hello", jan(7)));

    // Feed for user 3: weets by everyone they follow
    let mut feed = Vec::new();
    for followee in session.follows.get_follows(3) {
        feed.extend(session.weets.weets_by_user(followee));
    }
    assert_eq!(weet_ids(&feed), vec![100]);

    let author = session.users.get_user(feed[0].author()).unwrap();
    assert_eq!(author.name(), "member 1");
    assert_eq!(session.follows.mutual_follows(2, 3), vec![1]);
}

#[test]
fn test_rbtree_public_invariants() {
    let mut tree = RbTree::with_order(TraversalOrder::Descending);
    for key in (0..500u64).map(|k| (k * 37) % 500) {
        assert!(tree.insert(key, key.to_string()));
    }
    assert_eq!(tree.len(), 500);
    assert!(tree.validate().is_ok());
    assert_eq!(tree.traverse().first().map(|v| v.as_str()), Some("499"));
    assert_eq!(tree.find(&250).map(String::as_str), Some("250"));
}

#[test]
fn test_scripted_repl_session() {
    let script = "\
ADDUSER 1 2026-01-01T10:00 Ada Lovelace
ADDUSER 2 2026-01-02T10:00 Alan Turing
FOLLOW 2 1 2026-01-03T10:00
FOLLOW 2 2 2026-01-03T10:00
WEET 1 1 2026-01-04T10:00 First post #Hello
weet 2 2 2026-01-05T10:00 hello back #hello #reply
isfollower 2 1
FOLLOWERS 1
TRENDING
BOGUS
WEETSBEFORE 2026-01-04T10:00
QUIT
USERS
";
    let mut session = Session::with_config(Config::default());
    let mut out = Vec::new();
    run_repl(script.as_bytes(), &mut out, &mut session).unwrap();

    let expected = "\
1
1
1
0
1
1
1
2
END
#hello 2
#reply 1
END
ERR: unknown command 'BOGUS'
1 1 2026-01-04T10:00 First post #Hello
END
Exiting...
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}


proptest! {
    #[test]
    fn prop_joined_before_is_ordered_subset(
        days in proptest::collection::vec(0i64..400, 1..60),
        cut in 0i64..400,
    ) {
        let base = jan(1);
        let mut users = UserIndexStore::new();
        for (i, offset) in days.iter().enumerate() {
            users.add_user(User::new(i as u64, "p", base + Duration::days(*offset)));
        }
        let threshold = base + Duration::days(cut);

        let listed: Vec<Rc<User>> = users.list_users().to_vec();
        prop_assert!(listed.windows(2).all(|w| w[0].joined() >= w[1].joined()));

        let expected: Vec<u64> = listed
            .iter()
            .filter(|u| u.joined() <= threshold)
            .map(|u| u.id())
            .collect();
        prop_assert_eq!(user_ids(&users.users_joined_before(threshold)), expected);
    }

    #[test]
    fn prop_follows_sorted_and_directional(
        edges in proptest::collection::vec((0u64..8, 0u64..8, 0i64..100), 0..60),
    ) {
        let mut graph = FollowGraphStore::new();
        let mut added = Vec::new();
        for (a, b, offset) in &edges {
            let at = jan(1) + Duration::hours(*offset);
            if graph.add_edge(*a, *b, at) {
                added.push((*a, *b));
            }
        }

        for (a, b) in &added {
            prop_assert!(graph.is_follower(*a, *b));
            if !added.contains(&(*b, *a)) {
                prop_assert!(!graph.is_follower(*b, *a));
            }
        }
        for id in 0..8u64 {
            let followers = graph.get_followers(id);
            prop_assert_eq!(followers.clone(), graph.get_followers(id));
            prop_assert_eq!(followers.len(), graph.follower_count(id));
        }
    }
}
