// =====================================================================
// File: index/mod.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 5, 2026
//
//! The `index` module contains the red-black tree used for every
//! in-memory ordering of the store (by id, by timestamp, by author).
//!
//! Structure:
//! - `node.rs`  : Defines the [`RbNode`] structure, [`Color`] and [`Side`].
//! - `tree.rs`  : Defines the [`RbTree`] arena and its algorithms
//!                (insert, find, traverse, rebalancing, validation).
//! - `tests.rs` : Unit tests for the tree (compiled only in test mode).
//!
//! The tree is generic over both the key and the payload, so the same
//! rotation code serves plain record trees and augmented per-user trees.
// =====================================================================

pub mod node;
pub mod tree;

pub use self::node::{Color, NodeId, RbNode, Side};
pub use self::tree::{RbTree, TraversalOrder};
