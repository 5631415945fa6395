//! An ordered multiset backed by a plain, link-based Binary Search Tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores its values in `Node`s. Each `Node` holds one value and may have a
//! left and a right child. The tree in this crate keeps two invariants:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a value less than its own
//!    value.
//! 2. For every `Node`, all the `Node`s in its right subtree have a value greater than or equal
//!    to its own value. Equal values always go right, so duplicates are kept.
//!
//! > Rebuilding the tree or removing a value can move a duplicate to the left of an equal value.
//! > Every lookup treats the left side as "less than or equal" so this is harmless.
//!
//! Searching, inserting and removing all take `O(height)`. The tree never balances itself, so
//! adding sorted input gives a tree as tall as it is big. [`Tree::rebalance`] rebuilds it from
//! its sorted contents with the smallest possible height.
//!
//! Walking the tree in order (left subtree, node, right subtree) yields the values sorted.
//!
//! Fallible operations return [`Error`]. The crate logs through the [`log`] facade and leaves
//! installing a logger to the application.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod collection;
mod error;
pub mod linked;
mod stack;


pub use collection::Collection;
pub use error::{Error, Result};
pub use linked::Tree;
pub use stack::LinkedStack;
