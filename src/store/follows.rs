// =====================================================================
// File: store/follows.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 12, 2026
//
// Description:
//   `FollowGraphStore` keeps a single red-black tree of users keyed by
//   id. Each node carries `Relations`: two `DatedList`s holding the
//   user's followers (inbound) and followees (outbound) with the time
//   each follow happened.
//
//   A follow edge is stored twice, once on each side, so both
//   "who follows X" and "who does X follow" are one O(log n) lookup
//   plus a (lazily sorted) list read.
//
// Notes:
//   * Self-follows and repeated edges are rejected.
//   * A user node is created on first mention through
//     `RbTree::get_or_insert_with`, whichever side of the edge it is on.
//   * Mutual queries are a nested scan, O(n*m) in the two list sizes.
// =====================================================================
use tracing::{debug, warn};

use crate::cache::{DatedList, SortedSnapshot};
use crate::index::{RbTree, TraversalOrder};
use crate::models::{Timestamp, UserId};

/// The augmented payload of a follow-graph node.
#[derive(Debug, Clone, Default)]
pub struct Relations {
    /// Users following this one, with when they followed.
    pub followers: DatedList<UserId>,
    /// Users this one follows, with when they were followed.
    pub follows: DatedList<UserId>,
}


/// The follow graph, indexed by user id.
#[derive(Debug)]
pub struct FollowGraphStore {
    users: RbTree<UserId, Relations>,
    top_users: SortedSnapshot<(UserId, usize)>,
}


impl Default for FollowGraphStore {
    fn default() -> Self {
        Self::new()
    }
}


impl FollowGraphStore {
    pub fn new() -> Self {
        Self {
            // Walked highest id first when ranking top users
            users: RbTree::with_order(TraversalOrder::Descending),
            top_users: SortedSnapshot::new(),
        }
    }

    /// Number of users mentioned by at least one edge.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Record that `follower` started following `followee` at `at`.
    ///
    /// # Returns
    /// * `false` for a self-follow or an edge that already exists.
    /// * `true` once the edge is stored on both users. Either user's
    ///   node is created if this is its first mention.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use witterstore::store::FollowGraphStore;
    ///
    /// let at = NaiveDate::from_ymd_opt(2012, 11, 2).unwrap().and_hms_opt(23, 11, 0).unwrap();
    /// let mut graph = FollowGraphStore::new();
    /// assert!(graph.add_edge(1, 2, at));
    /// assert!(!graph.add_edge(1, 2, at));
    /// assert!(!graph.add_edge(3, 3, at));
    /// assert!(graph.is_follower(1, 2));
    /// assert!(!graph.is_follower(2, 1));
    /// ```
    pub fn add_edge(&mut self, follower: UserId, followee: UserId, at: Timestamp) -> bool {
        if follower == followee {
            warn!(user = follower, "self-follow rejected");
            return false;
        }
        let duplicate = self
            .users
            .find(&follower)
            .is_some_and(|relations| relations.follows.contains(&followee));
        if duplicate {
            debug!(follower, followee, "duplicate follow rejected");
            return false;
        }

        self.users
            .get_or_insert_with(follower, Relations::default)
            .follows
            .push(followee, at);
        self.users
            .get_or_insert_with(followee, Relations::default)
            .followers
            .push(follower, at);

        self.top_users.invalidate();
        debug!(follower, followee, users = self.users.len(), "follow added");
        true
    }

    /// Followers of `id`, most recent first. Empty if `id` is unknown.
    pub fn get_followers(&mut self, id: UserId) -> Vec<UserId> {
        self.users
            .find_mut(&id)
            .map(|relations| relations.followers.items())
            .unwrap_or_default()
    }

    /// Users followed by `id`, most recent first. Empty if `id` is unknown.
    pub fn get_follows(&mut self, id: UserId) -> Vec<UserId> {
        self.users
            .find_mut(&id)
            .map(|relations| relations.follows.items())
            .unwrap_or_default()
    }

    /// Whether `follower` follows `followee`.
    pub fn is_follower(&self, follower: UserId, followee: UserId) -> bool {
        self.users
            .find(&followee)
            .is_some_and(|relations| relations.followers.contains(&follower))
    }

    /// Number of followers. An unknown id reports 0, the same as a
    /// known user nobody follows.
    pub fn follower_count(&self, id: UserId) -> usize {
        self.users.find(&id).map_or(0, |relations| relations.followers.len())
    }

    /// Number of users `id` follows, 0 if unknown.
    pub fn follow_count(&self, id: UserId) -> usize {
        self.users.find(&id).map_or(0, |relations| relations.follows.len())
    }

    /// Users following both `a` and `b`, ordered by the later of the two
    /// follow times, most recent first.
    pub fn mutual_followers(&self, a: UserId, b: UserId) -> Vec<UserId> {
        match (self.users.find(&a), self.users.find(&b)) {
            (Some(first), Some(second)) => mutual(&first.followers, &second.followers),
            _ => Vec::new(),
        }
    }

    /// Users followed by both `a` and `b`, ordered by the later of the two
    /// follow times, most recent first.
    pub fn mutual_follows(&self, a: UserId, b: UserId) -> Vec<UserId> {
        match (self.users.find(&a), self.users.find(&b)) {
            (Some(first), Some(second)) => mutual(&first.follows, &second.follows),
            _ => Vec::new(),
        }
    }

    /// User ids ranked by follower count, highest first. Cached until
    /// the next edge is added.
    pub fn top_users_by_followers(&mut self) -> Vec<UserId> {
        self.top_users_with_counts().iter().map(|(id, _)| *id).collect()
    }

    /// The cached `(id, follower_count)` ranking behind
    /// [`top_users_by_followers`](Self::top_users_by_followers).
    pub fn top_users_with_counts(&mut self) -> &[(UserId, usize)] {
        let users = &self.users;
        self.top_users.rebuild_if_dirty(|| {
            let mut ranked: Vec<(UserId, usize)> = users
                .entries()
                .into_iter()
                .map(|(id, relations)| (*id, relations.followers.len()))
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked
        })
    }

    /// Run the red-black checks on the user tree. Test support.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> bool {
        self.users.validate().is_ok()
    }
}


/// Intersection of two relationship lists by nested scan.
///
/// Each shared id takes the later of its two timestamps; the result is
/// sorted by that timestamp, most recent first. Empty when either list
/// is empty.
fn mutual(first: &DatedList<UserId>, second: &DatedList<UserId>) -> Vec<UserId> {
    let mut shared: Vec<(UserId, Timestamp)> = Vec::new();

    for (id, first_at) in first.raw() {
        for (other, second_at) in second.raw() {
            if id == other {
                shared.push((*id, (*first_at).max(*second_at)));
                break;
            }
        }
    }

    shared.sort_by(|a, b| b.1.cmp(&a.1));
    shared.into_iter().map(|(id, _)| id).collect()
}
