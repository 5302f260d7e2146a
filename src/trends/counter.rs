// =====================================================================
// File: trends/counter.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 8, 2026
//
//! [`TrendCounter`] keeps a frequency table of hashtags in the order
//! they were first seen, and a ranked top list that is recomputed
//! lazily. Recording a tag only flips the dirty flag; the ranking is
//! paid for on the next read.
// =====================================================================
use std::collections::HashMap;

use tracing::debug;

/// Number of tags returned by [`TrendCounter::top`] unless configured.
pub const DEFAULT_TREND_LIMIT: usize = 10;


/// Frequency table over hashtag strings.
#[derive(Debug, Clone)]
pub struct TrendCounter {
    /// `(tag, count)` in first-seen order.
    entries: Vec<(String, usize)>,
    /// Tag -> position in `entries`.
    positions: HashMap<String, usize>,
    /// Cached ranking, valid while `dirty` is false.
    top: Vec<String>,
    dirty: bool,
    limit: usize,
}


impl Default for TrendCounter {
    fn default() -> Self {
        Self::new()
    }
}


impl TrendCounter {
    /// Create an empty counter returning at most [`DEFAULT_TREND_LIMIT`] tags.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_TREND_LIMIT)
    }

    /// Create an empty counter returning at most `limit` tags.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            top: Vec::new(),
            dirty: false,
            limit,
        }
    }

    #[cfg(test)]
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }

    /// Count one occurrence of `tag`.
    ///
    /// Increments the count if the tag is known, otherwise appends it
    /// with a count of one. Either way the ranking is marked stale.
    pub fn record(&mut self, tag: &str) {
        match self.positions.get(tag) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(tag.to_string(), self.entries.len());
                self.entries.push((tag.to_string(), 1));
            }
        }
        self.dirty = true;
    }

    /// Occurrences of `tag` so far, 0 if never seen.
    pub fn count(&self, tag: &str) -> usize {
        self.positions.get(tag).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct tags seen.
    #[cfg(test)]
    pub(crate) fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Tags ordered by descending count, at most `limit` of them.
    ///
    /// Fewer tags are returned when fewer distinct tags exist; the list
    /// is never padded. Tags with equal counts keep first-seen order.
    ///
    /// # Example
    /// ```
    /// use witterstore::trends::TrendCounter;
    ///
    /// let mut trends = TrendCounter::new();
    /// for tag in ["#b", "#a", "#a"] {
    ///     trends.record(tag);
    /// }
    /// assert_eq!(trends.top(), &["#a".to_string(), "#b".to_string()]);
    /// ```
    pub fn top(&mut self) -> &[String] {
        if self.dirty {
            let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            self.top = ranked
                .into_iter()
                .take(self.limit)
                .map(|(tag, _)| tag.clone())
                .collect();
            self.dirty = false;
            debug!(distinct = self.entries.len(), ranked = self.top.len(), "trends re-ranked");
        }
        &self.top
    }
}


/// Hashtags in a message: whitespace-separated tokens starting with
/// `#`, lower-cased.
///
/// # Example
/// ```
/// use witterstore::trends::extract_hashtags;
///
/// let tags: Vec<String> = extract_hashtags("Go #Rust and #rust\tagain#not").collect();
/// assert_eq!(tags, vec!["#rust", "#rust"]);
/// ```
pub fn extract_hashtags(message: &str) -> impl Iterator<Item = String> + '_ {
    message
        .split_whitespace()
        .filter(|word| word.starts_with('#'))
        .map(str::to_lowercase)
}
