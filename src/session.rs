// =====================================================================
// File: session.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 14, 2026
//
// Description:
// Defines the `Session` struct, the runtime context the REPL drives.
// It owns one of each store plus the loaded configuration.
//
// Responsibilities:
// - Hold the UserIndexStore, WeetIndexStore and FollowGraphStore.
// - Carry the Config so command handling can parse timestamps with
//   the configured formats.
// - Size the trend counter from `[trends] limit`.
//
// The stores are independent: a weet may name an author that was never
// added as a user, and a follow edge may name ids that exist nowhere
// else. The session does not cross-check them.
// =====================================================================
use chrono::NaiveDate;

use crate::config::Config;
use crate::models::{parse_date, parse_timestamp, Timestamp};
use crate::store::{FollowGraphStore, UserIndexStore, WeetIndexStore};

/// A single in-memory Witter session.
#[derive(Debug)]
pub struct Session {
    /// Users by id and by join time.
    pub users: UserIndexStore,

    /// Weets by id, by post time, by author, plus trends.
    pub weets: WeetIndexStore,

    /// Who follows whom, and when.
    pub follows: FollowGraphStore,

    config: Config,
}


impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}


impl Session {
    /// Creates a new, empty session with default settings.
    ///
    /// # Example
    /// ```
    /// use witterstore::Session;
    /// let session = Session::new();
    /// assert!(session.users.is_empty());
    /// assert_eq!(session.config().trends.limit, 10);
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty session using `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            users: UserIndexStore::new(),
            weets: WeetIndexStore::with_trend_limit(config.trends.limit),
            follows: FollowGraphStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a timestamp argument with the configured format.
    pub fn timestamp(&self, input: &str) -> Timestamp {
        parse_timestamp(input, &self.config.input.timestamp_format)
    }

    /// Parse a calendar-day argument with the configured format.
    pub fn date(&self, input: &str) -> NaiveDate {
        parse_date(input, &self.config.input.date_format)
    }

    /// How many whitespace-separated REPL tokens one timestamp spans.
    pub fn timestamp_width(&self) -> usize {
        token_width(&self.config.input.timestamp_format)
    }

    /// How many whitespace-separated REPL tokens one day spans.
    pub fn date_width(&self) -> usize {
        token_width(&self.config.input.date_format)
    }
}


fn token_width(format: &str) -> usize {
    format.split_whitespace().count().max(1)
}


// =====================================================================
// Unit Tests for Session
// =====================================================================
