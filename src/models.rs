// =====================================================================
// File: models.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 7, 2026
//
// Description:
//   Plain records handed to the stores: `User` and `Weet`. Both are
//   immutable once built. Also hosts timestamp parsing for the REPL,
//   which never fails: malformed input falls back to the default
//   timestamp so the stores only ever see valid values.
// =====================================================================
use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

pub type UserId = u64;
pub type WeetId = u64;
pub type Timestamp = NaiveDateTime;


/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    joined: Timestamp,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, joined: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            joined,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joined(&self) -> Timestamp {
        self.joined
    }
}


/// A single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weet {
    id: WeetId,
    author: UserId,
    message: String,
    posted: Timestamp,
}

impl Weet {
    pub fn new(id: WeetId, author: UserId, message: impl Into<String>, posted: Timestamp) -> Self {
        Self {
            id,
            author,
            message: message.into(),
            posted,
        }
    }

    pub fn id(&self) -> WeetId {
        self.id
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn posted(&self) -> Timestamp {
        self.posted
    }
}


/// Parse a timestamp with the given `chrono` format string.
///
/// Input that does not match resolves to the default timestamp
/// (1970-01-01 00:00) and logs a warning.
///
/// # Example
/// ```
/// use witterstore::models::parse_timestamp;
///
/// let ts = parse_timestamp("2012-11-02T23:11", "%Y-%m-%dT%H:%M");
/// assert_eq!(ts.to_string(), "2012-11-02 23:11:00");
///
/// let fallback = parse_timestamp("yesterday", "%Y-%m-%dT%H:%M");
/// assert_eq!(fallback, Default::default());
/// ```
pub fn parse_timestamp(input: &str, format: &str) -> Timestamp {
    match NaiveDateTime::parse_from_str(input, format) {
        Ok(ts) => ts,
        Err(e) => {
            warn!(input, format, error = %e, "malformed timestamp, using default");
            Timestamp::default()
        }
    }
}


/// Parse a calendar day. Falls back to the default day like
/// [`parse_timestamp`].
pub fn parse_date(input: &str, format: &str) -> NaiveDate {
    match NaiveDate::parse_from_str(input, format) {
        Ok(day) => day,
        Err(e) => {
            warn!(input, format, error = %e, "malformed date, using default");
            Timestamp::default().date()
        }
    }
}
