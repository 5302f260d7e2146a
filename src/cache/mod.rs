// =====================================================================
// File: cache/mod.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 7, 2026
//
//! The `cache` module holds the two lazily sorted structures the stores
//! keep next to their trees.
//!
//! Structure:
//! - `dated_list.rs` : [`DatedList`], an append-only list of items with
//!                     timestamps, sorted newest-first only when read.
//! - `snapshot.rs`   : [`SortedSnapshot`], a full listing derived from a
//!                     tree walk and rebuilt only after invalidation.
//! - `tests.rs`      : Unit tests (compiled only in test mode).
//!
//! Sorting is deferred: writes only flip a flag, the next read pays for
//! the sort, and reads in between are served as they are.
// =====================================================================

pub mod dated_list;
pub mod snapshot;

pub use self::dated_list::DatedList;
pub use self::snapshot::{cut_at_or_before, SortedSnapshot};
