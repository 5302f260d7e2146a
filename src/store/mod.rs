// =====================================================================
// File: store/mod.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 10, 2026
//
//! The `store` module contains the three facades the rest of the
//! program talks to. Each composes several [`RbTree`](crate::index::RbTree)
//! instances over the same entities and keeps them consistent on insert.
//!
//! Structure:
//! - `users.rs`   : [`UserIndexStore`] (by id, by join time).
//! - `weets.rs`   : [`WeetIndexStore`] (by id, by post time, by author,
//!                  plus hashtag trends).
//! - `follows.rs` : [`FollowGraphStore`] (users with follower and
//!                  followee lists).
//! - `tests.rs`   : Unit tests for all three facades.
// =====================================================================

pub mod follows;
pub mod users;
pub mod weets;

pub use self::follows::{FollowGraphStore, Relations};
pub use self::users::UserIndexStore;
pub use self::weets::WeetIndexStore;
