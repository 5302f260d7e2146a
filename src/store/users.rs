// =====================================================================
// File: store/users.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 10, 2026
//
// Description:
//   `UserIndexStore` keeps every user in two red-black trees:
//
//   - by id          : primary key, lookup and duplicate rejection.
//   - by join time   : keyed (joined, id), walked newest-first to build
//                      the cached full listing.
//
//   The listing is a `SortedSnapshot`, invalidated on each insert and
//   rebuilt on the next read. Name search and join-date cuts filter
//   that listing, so they inherit its newest-first order.
// =====================================================================
use std::rc::Rc;

use tracing::debug;

use crate::cache::{cut_at_or_before, SortedSnapshot};
use crate::index::{RbTree, TraversalOrder};
use crate::models::{Timestamp, User, UserId};

/// Users indexed by id and by join timestamp.
#[derive(Debug)]
pub struct UserIndexStore {
    by_id: RbTree<UserId, Rc<User>>,
    by_joined: RbTree<(Timestamp, UserId), Rc<User>>,
    listing: SortedSnapshot<Rc<User>>,
}


impl Default for UserIndexStore {
    fn default() -> Self {
        Self::new()
    }
}


impl UserIndexStore {
    pub fn new() -> Self {
        Self {
            by_id: RbTree::new(),
            by_joined: RbTree::with_order(TraversalOrder::Descending),
            listing: SortedSnapshot::new(),
        }
    }

    /// Number of users stored.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Add a user to both trees.
    ///
    /// # Returns
    /// * `false` if a user with the same id exists (nothing is touched).
    /// * `true` otherwise; the cached listing is marked stale.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use witterstore::models::User;
    /// use witterstore::store::UserIndexStore;
    ///
    /// let joined = NaiveDate::from_ymd_opt(2012, 11, 2).unwrap().and_hms_opt(23, 11, 0).unwrap();
    /// let mut users = UserIndexStore::new();
    /// assert!(users.add_user(User::new(1, "Ada", joined)));
    /// assert!(!users.add_user(User::new(1, "Imposter", joined)));
    /// assert_eq!(users.get_user(1).unwrap().name(), "Ada");
    /// ```
    pub fn add_user(&mut self, user: User) -> bool {
        let user = Rc::new(user);
        if !self.by_id.insert(user.id(), Rc::clone(&user)) {
            debug!(user = user.id(), "duplicate user rejected");
            return false;
        }
        // Id was unique, so the composite key is too
        self.by_joined.insert((user.joined(), user.id()), Rc::clone(&user));
        self.listing.invalidate();
        debug!(user = user.id(), total = self.by_id.len(), "user added");
        true
    }

    /// Direct lookup in the id tree.
    pub fn get_user(&self, id: UserId) -> Option<Rc<User>> {
        self.by_id.find(&id).cloned()
    }

    /// Every user, most recently joined first. Served from cache unless
    /// a user was added since the last call.
    pub fn list_users(&mut self) -> &[Rc<User>] {
        let by_joined = &self.by_joined;
        self.listing
            .rebuild_if_dirty(|| by_joined.traverse().into_iter().cloned().collect())
    }

    /// Users whose name contains `query`, ignoring case, in listing order.
    /// An empty query matches everyone.
    pub fn search_users_by_name(&mut self, query: &str) -> Vec<Rc<User>> {
        let query = query.to_lowercase();
        self.list_users()
            .iter()
            .filter(|user| user.name().to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Users who joined at or before `threshold`, in listing order.
    pub fn users_joined_before(&mut self, threshold: Timestamp) -> Vec<Rc<User>> {
        cut_at_or_before(self.list_users(), threshold, |user| user.joined()).to_vec()
    }

    /// Run the red-black checks on both trees. Test support.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> bool {
        self.by_id.validate().is_ok() && self.by_joined.validate().is_ok()
    }
}
