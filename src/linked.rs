//! A link-based BST that keeps every value it is given. Each `Node` owns its children through
//! `Option<Box<_>>` so there is no unsafe code and no parent pointers. Equal values are routed to
//! the right on insertion which makes the tree an ordered multiset.
//!
//! Nothing here rebalances on its own. Inserting sorted input produces a chain and
//! [`Tree::rebalance`] is the only way to shrink it back down. Because a chain can be as tall as
//! the tree is big, every walk below uses a loop or an explicit stack instead of recursion.
//!
//! # Examples
//!
//! ```
//! use linkedbst::Tree;
//!
//! let mut tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
//!
//! assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&1, &3, &4, &5, &8]);
//! assert_eq!(tree.height(), 2);
//!
//! // 5 has two children so it is replaced by the largest value on its left.
//! assert_eq!(tree.remove(&5), Ok(5));
//! assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&1, &3, &4, &8]);
//!
//! // Removing something that isn't there changes nothing.
//! assert!(tree.remove(&99).is_err());
//! assert_eq!(tree.len(), 4);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::stack::LinkedStack;

type Link<T> = Option<Box<Node<T>>>;

/// The cursor handed back by the eager traversals. The whole sequence has been collected by the
/// time the caller sees it.
pub type Traversal<'a, T> = std::vec::IntoIter<&'a T>;

/// An unbalanced Binary Search Tree over a totally ordered `T`. Duplicates are allowed and
/// removing a value only removes one copy of it.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Node {
            data,
            left: None,
            right: None,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Takes the largest value out of the subtree rooted at `top` by following right children.
    /// The node that held it has no right child so its left child takes its place. Returns the
    /// value and what is left of the subtree.
    fn take_max(mut top: Box<Self>) -> (T, Link<T>) {
        let mut link = &mut top.right;
        while link.as_ref().map_or(false, |n| n.right.is_some()) {
            if let Some(node) = link {
                link = &mut node.right;
            }
        }

        match link.take() {
            Some(max) => {
                let Node { data, left, .. } = *max;
                *link = left;
                (data, Some(top))
            }
            // `top` has no right child so it is the largest.
            None => {
                let Node { data, left, .. } = *top;
                (data, left)
            }
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        Self::release(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// How many values are stored, counting every duplicate.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every value.
    pub fn clear(&mut self) {
        Self::release(self.root.take());
        self.size = 0;
        debug!("cleared tree");
    }

    /// Inserts `item` at the first empty slot found by walking left for smaller values and right
    /// for everything else. This always succeeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&2, &2]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Potentially finds the stored value equal to `item`. If nothing matches, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let tree: Tree<_> = vec![1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match item.cmp(&node.data) {
                Ordering::Equal => return Some(&node.data),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Whether some stored value equals `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Removes one copy of `item` and returns it. Other copies stay where they are.
    ///
    /// A node with two children keeps its place in the tree and takes on the largest value of its
    /// left subtree instead, and the node that value came from is spliced out. A node with one
    /// child or none is replaced by that child.
    ///
    /// # Errors
    ///
    /// [`Error::ItemNotFound`] if no stored value equals `item`. The tree is not touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(Error::ItemNotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        // `link` is whichever slot holds the node under inspection, the root slot included, so
        // removing the root needs no special handling.
        let mut link = &mut self.root;
        loop {
            let go_left = match link.as_deref() {
                None => {
                    trace!("remove missed among {} items", self.size);
                    return Err(Error::ItemNotFound);
                }
                Some(node) => match item.cmp(&node.data) {
                    Ordering::Equal => break,
                    Ordering::Less => true,
                    Ordering::Greater => false,
                },
            };

            if let Some(node) = link {
                link = if go_left {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }

        // Taking an empty slot changes nothing but `link` always holds the match here.
        let Some(mut node) = link.take() else {
            return Err(Error::ItemNotFound);
        };
        let removed = match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                let (max, rest) = Node::take_max(left);
                node.left = rest;
                node.right = Some(right);
                let removed = mem::replace(&mut node.data, max);
                *link = Some(node);
                removed
            }
            (child, None) | (None, child) => {
                *link = child;
                let Node { data, .. } = *node;
                data
            }
        };

        self.size -= 1;
        trace!("removed item, {} left", self.size);

        Ok(removed)
    }

    /// Overwrites the stored value equal to `item` with `new_item` and returns the old value, or
    /// `None` if nothing matched.
    ///
    /// The node isn't moved. If `new_item` doesn't sort the same way `item` did relative to its
    /// neighbours the tree is no longer ordered, and lookups may miss values afterwards. Use
    /// [`remove`][Tree::remove] followed by [`add`][Tree::add] to change a value's position.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![10, 5, 15].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&5, 6), Some(5));
    /// assert_eq!(tree.replace(&5, 7), None);
    /// assert_eq!(tree.find(&6), Some(&6));
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match item.cmp(&node.data) {
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        None
    }

    /// The number of links on the longest path from the root to a leaf. A lone root has height 0
    /// and an empty tree has height -1.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(&Node<T>, isize)> =
            self.root.as_deref().map(|n| (n, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }

        height
    }

    /// A rough balance check: the tree counts as balanced when its height is below
    /// `2 * log2(len + 1) - 1`. Both sides are recomputed from scratch on every call. By this
    /// measure an empty tree is not balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        let amount = self.inorder().len();
        let height = self.height();

        (height as f64) < 2.0 * ((amount + 1) as f64).log2() - 1.0
    }

    /// Every stored value `v` with `low <= v <= high`, smallest first. Subtrees that lie wholly
    /// outside the range are never visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&3, &5), vec![&3, &4, &5]);
    /// assert!(tree.range_find(&6, &7).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                // The left subtree only holds values up to `node.data`.
                current = if node.data >= *low { node.left() } else { None };
            }

            let Some(node) = stack.pop() else {
                break;
            };
            if *low <= node.data && node.data <= *high {
                found.push(&node.data);
            }
            // The right subtree only holds values at or above `node.data`.
            current = if node.data <= *high { node.right() } else { None };
        }

        found
    }

    /// Rebuilds the tree from its sorted contents so it is as short as possible. The middle value
    /// (the upper one of the two for an even count) becomes the root and each half is rebuilt the
    /// same way. The values and their order are unchanged.
    pub fn rebalance(&mut self) {
        let items = Self::into_sorted(self.root.take(), self.size);
        let len = items.len();
        debug_assert_eq!(len, self.size);

        self.root = Self::build(len, &mut items.into_iter());
        debug!("rebalanced {} items to height {}", len, self.height());
    }

    /// The smallest stored value strictly greater than `item`. `item` itself doesn't have to be in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&4), Some(&5));
    /// assert_eq!(tree.successor(&6), Some(&8));
    /// assert_eq!(tree.successor(&8), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.data > *item {
                best = Some(&node.data);
                node.left()
            } else {
                node.right()
            };
        }

        best
    }

    /// The largest stored value strictly less than `item`. `item` itself doesn't have to be in the
    /// tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&5), Some(&4));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.data < *item {
                best = Some(&node.data);
                node.right()
            } else {
                node.left()
            };
        }

        best
    }

    /// Collects the values node first, then the left subtree, then the right subtree.
    pub fn preorder(&self) -> Traversal<'_, T> {
        let mut values = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            values.push(&node.data);
            stack.extend(node.right());
            stack.extend(node.left());
        }

        values.into_iter()
    }

    /// Collects the values in ascending order.
    pub fn inorder(&self) -> Traversal<'_, T> {
        let mut values = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }

            let Some(node) = stack.pop() else {
                break;
            };
            values.push(&node.data);
            current = node.right();
        }

        values.into_iter()
    }

    /// Collects the values left subtree first, then the right subtree, then the node.
    pub fn postorder(&self) -> Traversal<'_, T> {
        // Node, right, left is exactly postorder backwards.
        let mut values = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            values.push(&node.data);
            stack.extend(node.left());
            stack.extend(node.right());
        }
        values.reverse();

        values.into_iter()
    }

    /// Level order traversal isn't supported. This is always `None`.
    pub fn levelorder(&self) -> Option<Traversal<'_, T>> {
        None
    }

    /// Lazily walks the tree in preorder. Nothing is visited until the iterator is advanced and
    /// every call starts a fresh walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::Tree;
    ///
    /// let tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// let mut iter = tree.iter();
    ///
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&2, &1, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut stack = LinkedStack::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }

        Iter { stack }
    }

    /// Unlinks every node under `root` one at a time so dropping a chain doesn't recurse once per
    /// node.
    fn release(root: Link<T>) {
        let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }

    /// Takes every value out of the subtree under `current` in ascending order.
    fn into_sorted(mut current: Link<T>, capacity: usize) -> Vec<T> {
        let mut items = Vec::with_capacity(capacity);
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }

            let Some(node) = stack.pop() else {
                break;
            };
            let Node { data, right, .. } = *node;
            items.push(data);
            current = right;
        }

        items
    }

    /// Builds a minimal height subtree from the next `len` ascending values of `items`. The value
    /// at index `len / 2` becomes the root, so for two values the larger is the root and the
    /// smaller its left child. Recursion depth is `lg len`.
    fn build<I>(len: usize, items: &mut I) -> Link<T>
    where
        I: Iterator<Item = T>,
    {
        if len == 0 {
            return None;
        }

        let mid = len / 2;
        let left = Self::build(mid, items);
        // `len` never exceeds what `items` has left.
        let Some(data) = items.next() else {
            return left;
        };
        let right = Self::build(len - mid - 1, items);

        Some(Box::new(Node { data, left, right }))
    }
}

impl<T> Collection<T> for Tree<T>
where
    T: Ord,
{
    fn size(&self) -> usize {
        self.size
    }

    fn add(&mut self, item: T) {
        Tree::add(self, item);
    }

    fn is_empty(&self) -> bool {
        Tree::is_empty(self)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.add_all(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

/// Two trees are equal when they hold the same values the same number of times, whatever their
/// shapes.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.inorder().eq(other.inorder())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}

/// Draws the tree on its side, root on the left and larger values on top. Every line is one
/// value indented by `"| "` per level of depth.
///
/// ```
/// use linkedbst::Tree;
///
/// let tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref().map(|n| (n, 0));
        loop {
            while let Some((node, level)) = current {
                stack.push((node, level));
                current = node.right().map(|n| (n, level + 1));
            }

            let Some((node, level)) = stack.pop() else {
                break;
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.data)?;
            current = node.left().map(|n| (n, level + 1));
        }

        Ok(())
    }
}

/// Lazy preorder iterator over a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, T> {
    stack: LinkedStack<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Left goes on last so it comes off first.
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }

        Some(&node.data)
    }

    /// Every node still on the stack yields at least its own value.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
