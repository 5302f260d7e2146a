// =====================================================================
// File: index/node.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 5, 2026
//
// Description:
//   Defines the red-black tree node (`RbNode`) stored in the arena of
//   an `RbTree`. Each node maintains:
//
//   - `key`   : The ordering key (user id, weet id, or (timestamp, id)).
//   - `value` : The payload, which may carry augmented collections.
//   - `color` : Red or Black.
//   - `parent`, `left`, `right` : Arena handles of related nodes.
//
// Notes:
//   * Nodes never own each other. Links are indices into the arena, so
//     a rotation only rewrites a handful of `Option<NodeId>` fields.
//   * The sibling of a node is not stored. It is derived from the
//     parent in `tree.rs` every time it is needed.
// =====================================================================

/// Handle of a node inside an [`RbTree`](super::RbTree) arena.
pub type NodeId = usize;


/// Node color for the red-black invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}


/// Which child slot of its parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The mirror side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}


// Red-black referencing:
// http://cs.lmu.edu/~ray/notes/redblacktrees/
/// A single red-black tree node living in the arena.
#[derive(Debug)]
pub struct RbNode<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}


impl<K, V> RbNode<K, V> {
    /// Creates a detached node with no children.
    ///
    /// # Arguments
    ///
    /// * `key`    - The ordering key.
    /// * `value`  - The payload stored alongside the key.
    /// * `color`  - Initial color. New leaves are red, a first root is black.
    /// * `parent` - Handle of the parent, `None` for the root.
    ///
    /// # Example
    /// ```
    /// use witterstore::index::{Color, RbNode};
    /// let node = RbNode::new(7u64, "seven", Color::Red, None);
    /// assert!(node.is_red());
    /// assert!(node.left.is_none() && node.right.is_none());
    /// ```
    pub fn new(key: K, value: V, color: Color, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    /// Returns the child handle on the given side.
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Replaces the child handle on the given side.
    pub fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
