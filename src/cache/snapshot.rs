// =====================================================================
// File: cache/snapshot.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 7, 2026
//
// Description:
//   `SortedSnapshot` holds a store's full listing (all users by join
//   date, all weets by post date, all users by follower count). Every
//   insert calls `invalidate`; the next read rebuilds through
//   `rebuild_if_dirty` and every read after that is O(1) until the
//   next insert.
// =====================================================================
use tracing::debug;

/// Cached ordered listing with an explicit dirty flag.
#[derive(Debug, Clone)]
pub struct SortedSnapshot<T> {
    items: Vec<T>,
    dirty: bool,
}


impl<T> Default for SortedSnapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}


impl<T> SortedSnapshot<T> {
    /// An empty snapshot. Nothing has been inserted yet, so it is clean.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dirty: false,
        }
    }

    /// Mark the snapshot stale. Called by every successful insert.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the listing, rebuilding it with `build` first when stale.
    ///
    /// # Example
    /// ```
    /// use witterstore::cache::SortedSnapshot;
    ///
    /// let mut snapshot = SortedSnapshot::new();
    /// snapshot.invalidate();
    /// assert_eq!(snapshot.rebuild_if_dirty(|| vec![3, 2, 1]), &[3, 2, 1]);
    ///
    /// // Clean: the builder is not called again
    /// assert_eq!(snapshot.rebuild_if_dirty(|| unreachable!()), &[3, 2, 1]);
    /// ```
    pub fn rebuild_if_dirty<F>(&mut self, build: F) -> &[T]
    where
        F: FnOnce() -> Vec<T>,
    {
        if self.dirty {
            self.items = build();
            self.dirty = false;
            debug!(items = self.items.len(), "snapshot rebuilt");
        }
        &self.items
    }

    /// The last built listing, which may be stale.
    #[cfg(test)]
    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }
}


/// Given a list sorted descending by `key`, return the tail whose keys
/// are `<= threshold`.
///
/// The list is scanned from its end (oldest entry) toward the front
/// until the first key strictly after `threshold`; everything behind
/// that point qualifies. Returns the whole list when every key
/// qualifies and an empty slice when none do.
///
/// # Example
/// ```
/// use witterstore::cache::cut_at_or_before;
///
/// let days = [5, 4, 3, 2, 1];
/// assert_eq!(cut_at_or_before(&days, 3, |d| *d), &[3, 2, 1]);
/// assert_eq!(cut_at_or_before(&days, 9, |d| *d), &days[..]);
/// assert!(cut_at_or_before(&days, 0, |d| *d).is_empty());
/// ```
pub fn cut_at_or_before<T, K, F>(list: &[T], threshold: K, key: F) -> &[T]
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let cut = list
        .iter()
        .rposition(|item| key(item) > threshold)
        .map_or(0, |i| i + 1);
    &list[cut..]
}
