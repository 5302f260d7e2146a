// =====================================================================
// File: cache/dated_list.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 7, 2026
//
// Description:
//   `DatedList` is the secondary collection carried by augmented tree
//   nodes: a user's followers, a user's followees, an author's weets.
//   Appends are O(1) and leave the list unsorted. The first read after
//   an append sorts it newest-first; later reads are served as is.
// =====================================================================
use crate::models::Timestamp;

/// Append-only `(item, timestamp)` list, lazily sorted by timestamp
/// descending (most recent first). Equal timestamps keep insertion order.
#[derive(Debug, Clone)]
pub struct DatedList<T> {
    entries: Vec<(T, Timestamp)>,
    sorted: bool,
}


impl<T> Default for DatedList<T> {
    fn default() -> Self {
        Self::new()
    }
}


impl<T> DatedList<T> {
    /// Create an empty list. An empty list counts as sorted.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            sorted: true,
        }
    }

    /// Append an item and mark the list as needing a sort.
    pub fn push(&mut self, item: T, at: Timestamp) {
        self.entries.push((item, at));
        self.sorted = false;
    }

    /// Entries ordered newest-first, sorting first if an append
    /// happened since the last read.
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use witterstore::cache::DatedList;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let mut list = DatedList::new();
    /// list.push("old", day(1));
    /// list.push("new", day(3));
    /// list.push("mid", day(2));
    ///
    /// let order: Vec<&str> = list.sorted().iter().map(|(item, _)| *item).collect();
    /// assert_eq!(order, vec!["new", "mid", "old"]);
    /// ```
    pub fn sorted(&mut self) -> &[(T, Timestamp)] {
        if !self.sorted {
            self.entries.sort_by(|a, b| b.1.cmp(&a.1));
            self.sorted = true;
        }
        &self.entries
    }

    /// Entries as they are stored right now, without sorting.
    pub fn raw(&self) -> &[(T, Timestamp)] {
        &self.entries
    }

    #[cfg(test)]
    pub(crate) fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear scan for an item.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries.iter().any(|(stored, _)| stored == item)
    }

    /// Items only, newest-first.
    pub fn items(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        self.sorted().iter().map(|(item, _)| item.clone()).collect()
    }
}
