//! A BST stored in an arena of slots and addressed by [`NodeId`] handles.
//! Child links own their subtree; the parent link is a plain back-reference
//! used only for navigation, so it can never keep a node alive or form a
//! reference cycle.
//!
//! Duplicates are permitted and always route into the right subtree, so the
//! order invariant is `left < node <= right`.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::arena::Tree;
//!
//! let mut tree = Tree::with_root(7);
//! for value in [2, 5, 10, 9, 1] {
//!     tree.insert(value);
//! }
//!
//! // In-order traversal yields the values in ascending order.
//! assert_eq!(tree.to_vec(), vec![1, 2, 5, 7, 9, 10]);
//!
//! // Every node knows where it sits in the tree.
//! let ten = tree.search(&10).unwrap();
//! assert_eq!(tree.depth(ten), 1);
//! assert_eq!(tree.search(&3), None);
//!
//! // Deleting the root promotes the minimum of its right subtree.
//! let root = tree.root().unwrap();
//! let replacement = tree.remove(root).unwrap();
//! assert_eq!(*tree.value(replacement), 9);
//! assert_eq!(tree.to_vec(), vec![1, 2, 5, 9, 10]);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A handle to a node stored in a [`Tree`]. Handles are plain indices: they
/// are `Copy`, they compare by identity, and they stay valid until the node
/// they name is removed.
///
/// Using a handle after [`Tree::remove`] has destroyed its node is a
/// precondition violation, not a handled error: the tree will panic on a
/// vacated slot, and if the slot has been reused for a later insertion the
/// handle silently names that unrelated node. Callers must only pass handles
/// for nodes currently in the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

#[derive(Clone)]
struct Node<K> {
    value: K,
    /// Back-reference for navigation only. Never owns the node it names.
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K> Node<K> {
    fn new(value: K, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
        }
    }
}

/// A Binary Search Tree with parent back-references. This can be used for
/// inserting, finding, and deleting values, for ordered traversal, and for
/// structural queries (extrema, predecessor/successor, height, depth) on any
/// node, not just the root.
///
/// The tree never rebalances itself: its height is bounded by the insertion
/// count, not its logarithm. All operations are single-threaded; callers that
/// need shared access must wrap the whole tree in one external lock.
///
/// # Examples
///
/// ```
/// use ordered_tree::arena::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert_eq!(tree.search(&1), None);
///
/// tree.insert(1);
/// let one = tree.search(&1).unwrap();
/// assert_eq!(*tree.value(one), 1);
///
/// // Deleting a node returns the node that took its place, if any.
/// assert_eq!(tree.remove(one), None);
/// assert!(tree.is_empty());
/// ```
#[derive(Clone)]
pub struct Tree<K> {
    slots: Vec<Option<Node<K>>>,
    /// Indices of vacated slots, reused before the arena grows.
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Generates a single-node `Tree` holding the given value as its root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let tree = Tree::with_root(7);
    /// let root = tree.root().unwrap();
    ///
    /// assert!(tree.is_root(root));
    /// assert!(tree.is_leaf(root));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_root(value: K) -> Self {
        let mut tree = Self::new();
        let root = tree.alloc(value, None);
        tree.root = Some(root);
        tree
    }

    /// The number of nodes currently in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The value stored in the given node.
    pub fn value(&self, id: NodeId) -> &K {
        &self.node(id).value
    }

    /// The parent of the given node, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The left child of the given node, if any.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// The right child of the given node, if any.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    /// Inserts the given value as a new leaf and returns its handle. The
    /// descent goes left while `value` is less than the current node and
    /// right otherwise, so values equal to an existing node always land in
    /// its right subtree. Existing nodes are never moved or mutated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// // Duplicates are kept, not overwritten.
    /// assert_eq!(tree.to_vec(), vec![1, 2, 2]);
    /// ```
    pub fn insert(&mut self, value: K) -> NodeId
    where
        K: Ord,
    {
        let mut cur = match self.root {
            Some(root) => root,
            None => {
                let id = self.alloc(value, None);
                self.root = Some(id);
                return id;
            }
        };
        loop {
            if value < self.node(cur).value {
                match self.node(cur).left {
                    Some(left) => cur = left,
                    None => {
                        let id = self.alloc(value, Some(cur));
                        self.node_mut(cur).left = Some(id);
                        return id;
                    }
                }
            } else {
                match self.node(cur).right {
                    Some(right) => cur = right,
                    None => {
                        let id = self.alloc(value, Some(cur));
                        self.node_mut(cur).right = Some(id);
                        return id;
                    }
                }
            }
        }
    }

    /// Potentially finds a node holding the given value, walking the same
    /// left/right discipline as [`insert`](Tree::insert). Returns the first
    /// node on that path whose value is equal to the query, or `None` if the
    /// path runs out. Takes `O(depth)` and never mutates the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(7);
    /// tree.insert(2);
    ///
    /// assert!(tree.search(&2).is_some());
    /// assert_eq!(tree.search(&42), None);
    /// ```
    pub fn search(&self, value: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        let mut cur = self.root;
        while let Some(id) = cur {
            match value.cmp(&self.node(id).value) {
                Ordering::Less => cur = self.node(id).left,
                Ordering::Greater => cur = self.node(id).right,
                Ordering::Equal => return Some(id),
            }
        }
        None
    }

    /// Visits every value in ascending order: left subtree, then the node
    /// itself, then the right subtree. A pure read; calling it again restarts
    /// from the beginning.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(2);
    /// tree.insert(3);
    /// tree.insert(1);
    ///
    /// let mut visited = Vec::new();
    /// tree.traverse_in_order(|value| visited.push(*value));
    /// assert_eq!(visited, vec![1, 2, 3]);
    /// ```
    pub fn traverse_in_order(&self, mut visit: impl FnMut(&K)) {
        self.in_order(self.root, &mut visit);
    }

    fn in_order<F: FnMut(&K)>(&self, id: Option<NodeId>, visit: &mut F) {
        if let Some(id) = id {
            let node = self.node(id);
            self.in_order(node.left, visit);
            visit(&node.value);
            self.in_order(node.right, visit);
        }
    }

    /// Applies `transform` to every value in in-order sequence and collects
    /// the results, so the output is ordered by the input keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(2);
    /// tree.insert(3);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.map(|value| value * 10), vec![10, 20, 30]);
    /// ```
    pub fn map<T>(&self, mut transform: impl FnMut(&K) -> T) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        self.traverse_in_order(|value| out.push(transform(value)));
        out
    }

    /// The tree's contents as a sorted `Vec`, i.e. [`map`](Tree::map) with
    /// the identity transform.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map(K::clone)
    }

    /// The smallest node in the subtree rooted at `id`, found by following
    /// left links until none remain. A node with no left child is its own
    /// minimum.
    pub fn minimum(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(left) = self.node(cur).left {
            cur = left;
        }
        cur
    }

    /// The largest node in the subtree rooted at `id`, found by following
    /// right links until none remain. A node with no right child is its own
    /// maximum.
    pub fn maximum(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        while let Some(right) = self.node(cur).right {
            cur = right;
        }
        cur
    }

    /// The node holding the next-smaller value under in-order sequencing: the
    /// maximum of the left subtree if there is one, otherwise the nearest
    /// ancestor whose value is strictly less than this node's. `None` if this
    /// node holds the global minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(7);
    /// tree.insert(2);
    /// tree.insert(9);
    ///
    /// let root = tree.root().unwrap();
    /// let two = tree.search(&2).unwrap();
    ///
    /// assert_eq!(tree.predecessor(root), Some(two));
    /// assert_eq!(tree.predecessor(two), None);
    /// ```
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId>
    where
        K: Ord,
    {
        if let Some(left) = self.node(id).left {
            return Some(self.maximum(left));
        }
        let value = &self.node(id).value;
        let mut cur = self.node(id).parent;
        while let Some(ancestor) = cur {
            if self.node(ancestor).value < *value {
                return Some(ancestor);
            }
            cur = self.node(ancestor).parent;
        }
        None
    }

    /// The node holding the next-larger value under in-order sequencing: the
    /// minimum of the right subtree if there is one, otherwise the nearest
    /// ancestor whose value is strictly greater than this node's. `None` if
    /// this node holds the global maximum.
    pub fn successor(&self, id: NodeId) -> Option<NodeId>
    where
        K: Ord,
    {
        if let Some(right) = self.node(id).right {
            return Some(self.minimum(right));
        }
        let value = &self.node(id).value;
        let mut cur = self.node(id).parent;
        while let Some(ancestor) = cur {
            if self.node(ancestor).value > *value {
                return Some(ancestor);
            }
            cur = self.node(ancestor).parent;
        }
        None
    }

    /// Deletes the given node and returns the node that now occupies its
    /// position, or `None` if it was a leaf.
    ///
    /// The replacement is the minimum of the right subtree when a right child
    /// exists, otherwise the maximum of the left subtree. The replacement is
    /// first removed from its own position (it has at most one child, so that
    /// step cannot recurse back here), then spliced in: it inherits the
    /// deleted node's children and parent, with all their links repointed.
    /// The deleted node's slot is cleared and reused by later insertions.
    ///
    /// `id` must name a node currently in this tree; see [`NodeId`] for what
    /// happens otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(7);
    /// tree.insert(10);
    /// tree.insert(9);
    ///
    /// let root = tree.root().unwrap();
    /// let replacement = tree.remove(root).unwrap();
    ///
    /// assert_eq!(*tree.value(replacement), 9);
    /// assert_eq!(tree.root(), Some(replacement));
    /// assert_eq!(tree.to_vec(), vec![9, 10]);
    /// ```
    pub fn remove(&mut self, id: NodeId) -> Option<NodeId> {
        let replacement = self.unlink(id);
        self.slots[id.0] = None;
        self.free.push(id.0);
        self.len -= 1;
        replacement
    }

    /// Detaches `id` from its position and splices its replacement in,
    /// without freeing the slot. The node comes back with all three of its
    /// links cleared so it cannot keep any other node reachable.
    fn unlink(&mut self, id: NodeId) -> Option<NodeId> {
        let replacement = if let Some(right) = self.node(id).right {
            Some(self.minimum(right))
        } else if let Some(left) = self.node(id).left {
            Some(self.maximum(left))
        } else {
            None
        };

        if let Some(rep) = replacement {
            self.unlink(rep);

            // Re-read the children: if the replacement was a direct child,
            // unlinking it just changed them.
            let left = self.node(id).left;
            let right = self.node(id).right;
            self.node_mut(rep).left = left;
            self.node_mut(rep).right = right;
            if let Some(left) = left {
                self.node_mut(left).parent = Some(rep);
            }
            if let Some(right) = right {
                self.node_mut(right).parent = Some(rep);
            }
        }

        self.reconnect_parent(id, replacement);

        let node = self.node_mut(id);
        node.parent = None;
        node.left = None;
        node.right = None;

        replacement
    }

    /// Points whatever used to reach `id` (its parent's child link, or the
    /// root slot) at `replacement`, and gives `replacement` the parent it
    /// just gained.
    fn reconnect_parent(&mut self, id: NodeId, replacement: Option<NodeId>) {
        let parent = self.node(id).parent;
        match parent {
            Some(parent_id) => {
                if self.node(parent_id).left == Some(id) {
                    self.node_mut(parent_id).left = replacement;
                } else {
                    self.node_mut(parent_id).right = replacement;
                }
            }
            None => self.root = replacement,
        }
        if let Some(rep) = replacement {
            self.node_mut(rep).parent = parent;
        }
    }

    /// The height of the subtree rooted at `id`: 0 for a leaf, otherwise one
    /// more than the taller child's height.
    pub fn height(&self, id: NodeId) -> usize {
        let node = self.node(id);
        if node.left.is_none() && node.right.is_none() {
            return 0;
        }
        let left = node.left.map_or(0, |left| self.height(left));
        let right = node.right.map_or(0, |right| self.height(right));
        1 + left.max(right)
    }

    /// How many parent links separate `id` from the root. 0 for the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.node(id).parent;
        while let Some(parent) = cur {
            depth += 1;
            cur = self.node(parent).parent;
        }
        depth
    }

    /// Verifies the order invariant for the subtree rooted at `id` against
    /// the closed bound `[min, max]`, tightening `max` to the node's value
    /// for the left recursion and `min` for the right. Call it on the root
    /// with the key type's extremes for a whole-tree check.
    ///
    /// This checks ordering only; parent-consistency and acyclicity are
    /// separate invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(7);
    /// tree.insert(2);
    /// tree.insert(9);
    ///
    /// let root = tree.root().unwrap();
    /// assert!(tree.is_bst(root, &i32::MIN, &i32::MAX));
    /// assert!(!tree.is_bst(root, &8, &i32::MAX));
    /// ```
    pub fn is_bst(&self, id: NodeId, min: &K, max: &K) -> bool
    where
        K: Ord,
    {
        let node = self.node(id);
        if node.value < *min || node.value > *max {
            return false;
        }
        let left_ok = node
            .left
            .map_or(true, |left| self.is_bst(left, min, &node.value));
        let right_ok = node
            .right
            .map_or(true, |right| self.is_bst(right, &node.value, max));
        left_ok && right_ok
    }

    /// Whether the given node is the root, i.e. has no parent.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).parent.is_none()
    }

    /// Whether the given node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        !self.has_any_child(id)
    }

    /// Whether the given node is its parent's left child.
    pub fn is_left_child(&self, id: NodeId) -> bool {
        self.node(id)
            .parent
            .map_or(false, |parent| self.node(parent).left == Some(id))
    }

    /// Whether the given node is its parent's right child.
    pub fn is_right_child(&self, id: NodeId) -> bool {
        self.node(id)
            .parent
            .map_or(false, |parent| self.node(parent).right == Some(id))
    }

    /// Whether the given node has a left child.
    pub fn has_left_child(&self, id: NodeId) -> bool {
        self.node(id).left.is_some()
    }

    /// Whether the given node has a right child.
    pub fn has_right_child(&self, id: NodeId) -> bool {
        self.node(id).right.is_some()
    }

    /// Whether the given node has at least one child.
    pub fn has_any_child(&self, id: NodeId) -> bool {
        self.has_left_child(id) || self.has_right_child(id)
    }

    /// Whether the given node has both children.
    pub fn has_both_children(&self, id: NodeId) -> bool {
        self.has_left_child(id) && self.has_right_child(id)
    }

    /// The number of nodes in the subtree rooted at `id`, itself included.
    /// `O(subtree size)`; use [`len`](Tree::len) for the whole tree.
    pub fn count(&self, id: NodeId) -> usize {
        let node = self.node(id);
        let left = node.left.map_or(0, |left| self.count(left));
        let right = node.right.map_or(0, |right| self.count(right));
        left + 1 + right
    }

    fn alloc(&mut self, value: K, parent: Option<NodeId>) -> NodeId {
        self.len += 1;
        let node = Node::new(value, parent);
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        self.slots[id.0]
            .as_ref()
            .expect("NodeId names a node that was removed from the tree")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots[id.0]
            .as_mut()
            .expect("NodeId names a node that was removed from the tree")
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result
    where
        K: fmt::Display,
    {
        let node = self.node(id);
        if let Some(left) = node.left {
            f.write_str("(")?;
            self.fmt_node(f, left)?;
            f.write_str(") <- ")?;
        }
        write!(f, "{}", node.value)?;
        if let Some(right) = node.right {
            f.write_str(" -> (")?;
            self.fmt_node(f, right)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Renders the structure with the left subtree before each value and the
/// right subtree after it, recursively parenthesized. For human inspection
/// only.
///
/// # Examples
///
/// ```
/// use ordered_tree::arena::Tree;
///
/// let mut tree = Tree::with_root(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// assert_eq!(tree.to_string(), "(1) <- 2 -> (3)");
/// ```
impl<K: fmt::Display> fmt::Display for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root),
            None => Ok(()),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.traverse_in_order(|value| {
            list.entry(value);
        });
        list.finish()
    }
}
