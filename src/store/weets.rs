// =====================================================================
// File: store/weets.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 11, 2026
//
// Description:
//   `WeetIndexStore` keeps every weet in three red-black trees plus a
//   trend counter:
//
//   - by id      : primary key, lookup and duplicate rejection.
//   - by post    : keyed (posted, id), walked newest-first to build
//                  the cached full listing.
//   - by author  : one node per author, each owning a `DatedList` of
//                  that author's weets (sorted lazily on read).
//   - trends     : hashtag counts taken from every stored message.
//
// Notes:
//   * An insert is all-or-nothing: a duplicate id is rejected before
//     any other tree, list or counter is touched.
// =====================================================================
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{cut_at_or_before, DatedList, SortedSnapshot};
use crate::index::{RbTree, TraversalOrder};
use crate::models::{Timestamp, UserId, Weet, WeetId};
use crate::trends::{extract_hashtags, TrendCounter, DEFAULT_TREND_LIMIT};

/// Weets indexed by id, by post timestamp and by author.
#[derive(Debug)]
pub struct WeetIndexStore {
    by_id: RbTree<WeetId, Rc<Weet>>,
    by_posted: RbTree<(Timestamp, WeetId), Rc<Weet>>,
    by_author: RbTree<UserId, DatedList<Rc<Weet>>>,
    listing: SortedSnapshot<Rc<Weet>>,
    trends: TrendCounter,
}


impl Default for WeetIndexStore {
    fn default() -> Self {
        Self::new()
    }
}


impl WeetIndexStore {
    pub fn new() -> Self {
        Self::with_trend_limit(DEFAULT_TREND_LIMIT)
    }

    /// Create a store whose `trending` returns at most `limit` tags.
    pub fn with_trend_limit(limit: usize) -> Self {
        Self {
            by_id: RbTree::new(),
            by_posted: RbTree::with_order(TraversalOrder::Descending),
            by_author: RbTree::new(),
            listing: SortedSnapshot::new(),
            trends: TrendCounter::with_limit(limit),
        }
    }

    /// Number of weets stored.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Add a weet to every index.
    ///
    /// # Behavior
    /// - Rejects (returns `false`) a weet whose id is already stored.
    /// - Otherwise inserts into the id and post-time trees, appends to
    ///   the author's list (creating the author node on first post),
    ///   counts each hashtag and marks the listing stale.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use witterstore::models::Weet;
    /// use witterstore::store::WeetIndexStore;
    ///
    /// let at = NaiveDate::from_ymd_opt(2012, 11, 2).unwrap().and_hms_opt(23, 11, 0).unwrap();
    /// let mut weets = WeetIndexStore::new();
    /// assert!(weets.add_weet(Weet::new(1, 7, "Hello World! #first", at)));
    /// assert!(!weets.add_weet(Weet::new(1, 7, "again", at)));
    /// assert_eq!(weets.weets_by_user(7).len(), 1);
    /// assert_eq!(weets.trending(), vec!["#first".to_string()]);
    /// ```
    pub fn add_weet(&mut self, weet: Weet) -> bool {
        let weet = Rc::new(weet);
        if !self.by_id.insert(weet.id(), Rc::clone(&weet)) {
            debug!(weet = weet.id(), "duplicate weet rejected");
            return false;
        }

        self.by_posted.insert((weet.posted(), weet.id()), Rc::clone(&weet));
        self.by_author
            .get_or_insert_with(weet.author(), DatedList::new)
            .push(Rc::clone(&weet), weet.posted());

        for tag in extract_hashtags(weet.message()) {
            self.trends.record(&tag);
        }

        self.listing.invalidate();
        debug!(weet = weet.id(), author = weet.author(), total = self.by_id.len(), "weet added");
        true
    }

    /// Direct lookup in the id tree.
    pub fn get_weet(&self, id: WeetId) -> Option<Rc<Weet>> {
        self.by_id.find(&id).cloned()
    }

    /// Every weet, most recent first. Served from cache unless a weet
    /// was added since the last call.
    pub fn list_weets(&mut self) -> &[Rc<Weet>] {
        let by_posted = &self.by_posted;
        self.listing
            .rebuild_if_dirty(|| by_posted.traverse().into_iter().cloned().collect())
    }

    /// An author's weets, most recent first. Empty for an unknown author.
    pub fn weets_by_user(&mut self, author: UserId) -> Vec<Rc<Weet>> {
        self.by_author
            .find_mut(&author)
            .map(|weets| weets.items())
            .unwrap_or_default()
    }

    /// Weets whose message contains `query`, ignoring case, in listing
    /// order. A blank query matches nothing.
    pub fn weets_containing(&mut self, query: &str) -> Vec<Rc<Weet>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        self.list_weets()
            .iter()
            .filter(|weet| weet.message().to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Weets posted on the given calendar day, in listing order.
    pub fn weets_on(&mut self, day: NaiveDate) -> Vec<Rc<Weet>> {
        self.list_weets()
            .iter()
            .filter(|weet| weet.posted().date() == day)
            .cloned()
            .collect()
    }

    /// Weets posted at or before `threshold`, in listing order.
    pub fn weets_before(&mut self, threshold: Timestamp) -> Vec<Rc<Weet>> {
        cut_at_or_before(self.list_weets(), threshold, |weet| weet.posted()).to_vec()
    }

    /// Up to the configured number of hashtags (10 by default), most
    /// frequent first.
    pub fn trending(&mut self) -> Vec<String> {
        self.trends.top().to_vec()
    }

    /// Occurrences of `tag` (with its `#`) across stored weets.
    pub fn trend_count(&self, tag: &str) -> usize {
        self.trends.count(&tag.to_lowercase())
    }

    /// Run the red-black checks on all three trees. Test support.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> bool {
        self.by_id.validate().is_ok()
            && self.by_posted.validate().is_ok()
            && self.by_author.validate().is_ok()
    }
}
