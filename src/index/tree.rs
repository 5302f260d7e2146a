// =====================================================================
// File: index/tree.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 5, 2026 - Refactored Oct. 9, 2026
//
// Description:
//   Implements the red-black tree index (`RbTree`) that manages insert,
//   lookup and ordered traversal over an arena of `RbNode` structures.
//   Every store facade is built from one or more of these trees.
//
// Features:
//   - `insert`: Adds a key-value pair, rejecting duplicate keys.
//   - `find` / `find_mut`: Standard binary search descent.
//   - `get_or_insert_with`: Single create-or-fetch path used by the
//     augmented (per-user) trees.
//   - `traverse` / `entries`: Full in-order walk in the tree's order.
//   - `validate`: Checks every red-black invariant (used by tests).
//
// Notes:
//   * Relies on `node.rs` for the `RbNode` definition.
//   * Rebalancing after an insert either recolors (red uncle) or
//     restructures with a single or double rotation (black/missing
//     uncle). Both cases are handled in `check_node`.
//   * Nodes are never removed, so a `NodeId` stays valid for the life
//     of the tree. Rotations only rewrite links.
// =====================================================================
use std::cmp::Ordering;

use tracing::trace;

use super::node::{Color, NodeId, RbNode, Side};
use crate::error::InvariantViolation;

/// Direction in which `traverse` and `entries` walk the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    #[default]
    Ascending,
    Descending,
}


/// Red-black tree index. Owns its nodes in a flat arena and keeps the
/// handle of the current root.
#[derive(Debug)]
pub struct RbTree<K, V> {
    nodes: Vec<RbNode<K, V>>,
    root: Option<NodeId>,
    order: TraversalOrder,
}


impl<K: Ord, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}


// Red-black referencing:
// http://cs.lmu.edu/~ray/notes/redblacktrees/
// https://www.geeksforgeeks.org/dsa/introduction-to-red-black-tree/
impl<K: Ord, V> RbTree<K, V> {
    /// Create a new empty tree that traverses in ascending key order.
    pub fn new() -> Self {
        Self::with_order(TraversalOrder::Ascending)
    }

    /// Create a new empty tree with an explicit traversal order.
    ///
    /// # Example
    /// ```
    /// use witterstore::index::{RbTree, TraversalOrder};
    ///
    /// let mut tree = RbTree::with_order(TraversalOrder::Descending);
    /// for key in [3u64, 1, 2] {
    ///     tree.insert(key, key * 10);
    /// }
    /// assert_eq!(tree.traverse(), vec![&30u64, &20, &10]);
    /// ```
    pub fn with_order(order: TraversalOrder) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            order,
        }
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handle of the current root, `None` while the tree is empty.
    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrow a node by handle, for structural checks.
    #[cfg(test)]
    pub(crate) fn node(&self, id: NodeId) -> Option<&RbNode<K, V>> {
        self.nodes.get(id)
    }

    /// Insert a key-value pair into the tree.
    ///
    /// - If the key already exists the tree is left untouched and
    ///   `false` is returned.
    /// - Otherwise a red leaf is attached at the binary-search position,
    ///   the tree is rebalanced and `true` is returned.
    ///
    /// # Arguments
    /// * `key`   - The key to insert.
    /// * `value` - The value to associate with the key.
    ///
    /// # Example
    /// ```
    /// use witterstore::index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert!(tree.insert(5u64, "bob"));
    /// assert!(!tree.insert(5u64, "alice"));
    /// assert_eq!(tree.find(&5), Some(&"bob"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.locate(&key) {
            Ok(_) => false,
            Err((parent, side)) => {
                self.attach(key, value, parent, side);
                true
            }
        }
    }

    /// Search for a key in the tree.
    ///
    /// # Returns
    /// * `Some(&V)` if the key exists.
    /// * `None` if the key is not found.
    ///
    /// Search runs in **O(log n)** time due to the red-black height bound.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.locate(key).ok().map(|id| &self.nodes[id].value)
    }

    /// Mutable variant of [`find`](Self::find). The key itself can never
    /// be changed through this handle, so ordering is preserved.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.locate(key) {
            Ok(id) => Some(&mut self.nodes[id].value),
            Err(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_ok()
    }

    /// Fetch the value stored under `key`, creating it with `make` first
    /// if the key is absent. This is the only way augmented trees create
    /// nodes, so "create on first mention" always goes through one path.
    ///
    /// # Example
    /// ```
    /// use witterstore::index::RbTree;
    ///
    /// let mut tree: RbTree<u64, Vec<u64>> = RbTree::new();
    /// tree.get_or_insert_with(1, Vec::new).push(2);
    /// tree.get_or_insert_with(1, Vec::new).push(3);
    /// assert_eq!(tree.find(&1), Some(&vec![2, 3]));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let id = match self.locate(&key) {
            Ok(id) => id,
            Err((parent, side)) => self.attach(key, make(), parent, side),
        };
        &mut self.nodes[id].value
    }

    /// Collects every value by key order (ascending or descending per the
    /// tree's [`TraversalOrder`]). Walks the whole tree on each call.
    pub fn traverse(&self) -> Vec<&V> {
        self.entries().into_iter().map(|(_, value)| value).collect()
    }

    /// Collects every key-value pair by key order.
    ///
    /// This is an iterative in-order walk: descend along the "first"
    /// side pushing handles, pop one, emit it, then continue from its
    /// "second" side. For a descending tree the sides are swapped.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        let (first, second) = match self.order {
            TraversalOrder::Ascending => (Side::Left, Side::Right),
            TraversalOrder::Descending => (Side::Right, Side::Left),
        };

        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut pointer = self.root;

        loop {
            while let Some(id) = pointer {
                stack.push(id);
                pointer = self.nodes[id].child(first);
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = &self.nodes[id];
            out.push((&node.key, &node.value));
            pointer = node.child(second);
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        fn depth<A, B>(nodes: &[RbNode<A, B>], id: Option<NodeId>) -> usize {
            match id {
                None => 0,
                Some(id) => 1 + depth(nodes, nodes[id].left).max(depth(nodes, nodes[id].right)),
            }
        }
        depth(&self.nodes, self.root)
    }

    /// Check all red-black invariants over the whole tree.
    ///
    /// # Returns
    /// * `Ok(black_height)` when the root is black, no red node has a red
    ///   child, every path carries the same number of black nodes, keys
    ///   are in binary-search order and parent links agree with child links.
    /// * `Err(InvariantViolation)` describing the first problem found.
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        if self.nodes[root].parent.is_some() {
            return Err(InvariantViolation::ParentLink { child: root });
        }
        if self.nodes[root].is_red() {
            return Err(InvariantViolation::RedRoot(root));
        }
        self.black_height(root, None, None)
    }


    // =========================
    // Descent helpers
    // =========================

    /// Binary search descent.
    ///
    /// Returns `Ok(id)` when the key is present, otherwise the would-be
    /// parent of a new node and the side it should hang on.
    fn locate(&self, key: &K) -> Result<NodeId, (Option<NodeId>, Side)> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut pointer = self.root;

        while let Some(id) = pointer {
            let node = &self.nodes[id];
            match key.cmp(&node.key) {
                Ordering::Equal => return Ok(id),
                Ordering::Less => {
                    parent = Some(id);
                    side = Side::Left;
                    pointer = node.left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    side = Side::Right;
                    pointer = node.right;
                }
            }
        }
        Err((parent, side))
    }

    /// Push a new node into the arena, hang it under `parent` and rebalance.
    fn attach(&mut self, key: K, value: V, parent: Option<NodeId>, side: Side) -> NodeId {
        let id = self.nodes.len();
        let color = if parent.is_some() { Color::Red } else { Color::Black };
        self.nodes.push(RbNode::new(key, value, color, parent));

        match parent {
            Some(parent) => self.nodes[parent].set_child(side, Some(id)),
            None => self.root = Some(id),
        }

        self.check_node(id);
        self.check_root();
        id
    }


    // =========================
    // Family helpers
    // =========================

    /// Which side of its parent `id` hangs on. `None` for the root.
    fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.nodes[id].parent?;
        if self.nodes[parent].left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The other child of `id`'s parent, derived on demand.
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(id)?.parent?;
        let side = self.side_of(id)?;
        self.nodes[parent].child(side.opposite())
    }

    /// The sibling of `id`'s parent.
    fn uncle(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        self.sibling(parent)
    }


    // =========================
    // Rebalancing helpers
    // =========================

    /// Walk upward from a freshly inserted node resolving double reds.
    ///
    /// # Behavior
    /// - Black parent (or no parent): nothing to do.
    /// - Red uncle: **recolor** parent and uncle black, grandparent red,
    ///   then continue the check from the grandparent.
    /// - Black or missing uncle: **restructure** with a single or double
    ///   rotation, which always ends the walk.
    fn check_node(&mut self, inserted: NodeId) {
        let mut current = inserted;

        while let Some(parent) = self.nodes[current].parent {
            if !(self.nodes[current].is_red() && self.nodes[parent].is_red()) {
                return;
            }
            // The root is always black, so a red parent has a parent of its own
            let Some(grandparent) = self.nodes[parent].parent else {
                unreachable!("red node {parent} cannot be the root");
            };

            match self.uncle(current) {
                Some(uncle) if self.nodes[uncle].is_red() => {
                    self.recolor(parent, uncle, grandparent);
                    current = grandparent;
                }
                _ => {
                    self.restructure(current, parent, grandparent);
                    return;
                }
            }
        }
    }

    /// Flip colors below `grandparent`. The grandparent may end up a red
    /// root for a moment; `check_root` blackens it at the end of the insert.
    fn recolor(&mut self, parent: NodeId, uncle: NodeId, grandparent: NodeId) {
        self.nodes[parent].color = Color::Black;
        self.nodes[uncle].color = Color::Black;
        self.nodes[grandparent].color = Color::Red;
        trace!(parent, uncle, grandparent, "recolor");
    }

    /// Resolve a double red with a black (or missing) uncle.
    ///
    /// - Same side (left-left, right-right): promote the parent.
    /// - Opposite sides (left-right, right-left): promote the node itself
    ///   twice, placing it above both the old parent and grandparent.
    ///
    /// The promoted node becomes black, the old grandparent red.
    fn restructure(&mut self, node: NodeId, parent: NodeId, grandparent: NodeId) {
        let (Some(parent_side), Some(child_side)) = (self.side_of(parent), self.side_of(node)) else {
            unreachable!("restructure needs a node with both parent and grandparent");
        };

        let promoted = if parent_side == child_side {
            self.rotate_up(parent);
            parent
        } else {
            self.rotate_up(node);
            self.rotate_up(node);
            node
        };

        self.nodes[promoted].color = Color::Black;
        self.nodes[grandparent].color = Color::Red;
    }

    //         (C)
    //        /              (B)
    //     (B)      ->      /   \
    //    /   \           (A)   (C)
    // (A)    (x)               /
    //                        (x)
    /// Promote `id` one level, demoting its parent to the vacated side.
    /// The inner subtree of `id` (x above) moves across to the old parent.
    fn rotate_up(&mut self, id: NodeId) {
        let (Some(parent), Some(side)) = (self.nodes[id].parent, self.side_of(id)) else {
            unreachable!("cannot rotate the root upward");
        };
        let grandparent = self.nodes[parent].parent;
        let parent_side = self.side_of(parent);

        // Inner subtree changes owner
        let inner = self.nodes[id].child(side.opposite());
        self.nodes[parent].set_child(side, inner);
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(parent);
        }

        // Old parent drops below
        self.nodes[id].set_child(side.opposite(), Some(parent));
        self.nodes[parent].parent = Some(id);

        // Promoted node takes the parent's slot
        self.nodes[id].parent = grandparent;
        match (grandparent, parent_side) {
            (Some(grandparent), Some(parent_side)) => {
                self.nodes[grandparent].set_child(parent_side, Some(id));
            }
            _ => self.root = Some(id),
        }
        trace!(promoted = id, demoted = parent, "rotation");
    }

    /// Re-walk up to the true root after a rebalance and force it black.
    fn check_root(&mut self) {
        let Some(mut root) = self.root else {
            return;
        };
        while let Some(parent) = self.nodes[root].parent {
            root = parent;
        }
        self.root = Some(root);
        self.nodes[root].color = Color::Black;
    }


    // =========================
    // Validation helpers
    // =========================

    /// Recursive invariant check below `id`, bounded by the open key
    /// interval (`low`, `high`). Returns the black height of the subtree
    /// (missing children count as zero).
    fn black_height(&self, id: NodeId, low: Option<&K>, high: Option<&K>) -> Result<usize, InvariantViolation> {
        let node = &self.nodes[id];
        if low.is_some_and(|low| node.key <= *low) || high.is_some_and(|high| node.key >= *high) {
            return Err(InvariantViolation::KeyOrder { node: id });
        }

        let mut heights = [0usize; 2];
        for (slot, side) in [Side::Left, Side::Right].into_iter().enumerate() {
            let Some(child) = node.child(side) else {
                continue;
            };
            let child_node = &self.nodes[child];
            if child_node.parent != Some(id) {
                return Err(InvariantViolation::ParentLink { child });
            }
            if node.is_red() && child_node.is_red() {
                return Err(InvariantViolation::DoubleRed { parent: id, child });
            }
            let (low, high) = match side {
                Side::Left => (low, Some(&node.key)),
                Side::Right => (Some(&node.key), high),
            };
            heights[slot] = self.black_height(child, low, high)?;
        }

        if heights[0] != heights[1] {
            return Err(InvariantViolation::BlackHeight {
                node: id,
                left: heights[0],
                right: heights[1],
            });
        }
        Ok(heights[0] + usize::from(node.is_black()))
    }
}
