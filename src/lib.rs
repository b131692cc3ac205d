//! This crate exposes a Binary Search Tree (BST) whose nodes carry
//! parent back-references, so that every node can answer structural
//! questions (depth, predecessor, successor) and be deleted in place.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Duplicates are allowed
//!    and always route right.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! The trees in this crate do **not** rebalance themselves. Inserting keys in
//! ascending order produces a degenerate tree whose height equals the number
//! of insertions; that is an accepted property of the structure, not a bug.

#![deny(missing_docs)]

pub mod arena;
