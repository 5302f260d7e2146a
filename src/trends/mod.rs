// =====================================================================
// File: trends/mod.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 8, 2026
//
//! The `trends` module counts hashtags seen in weets and ranks them.
//!
//! Structure:
//! - `counter.rs` : Defines [`TrendCounter`] and [`extract_hashtags`].
//! - `tests.rs`   : Unit tests for counting and ranking.
// =====================================================================

pub mod counter;

pub use self::counter::{extract_hashtags, TrendCounter, DEFAULT_TREND_LIMIT};
