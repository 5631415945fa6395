//! The capabilities every collection in this crate shares: size bookkeeping and bulk loading.

/// A container that items can be added to one at a time.
///
/// # Examples
///
/// ```
/// use linkedbst::{Collection, Tree};
///
/// let mut tree: Tree<i32> = Tree::new();
/// assert!(Collection::is_empty(&tree));
///
/// tree.add_all(vec![3, 1, 2]);
/// assert_eq!(tree.size(), 3);
/// ```
pub trait Collection<T> {
    /// How many items are held.
    fn size(&self) -> usize;

    /// Adds a single item.
    fn add(&mut self, item: T);

    /// Whether nothing is held.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Adds every item from `items`, in the order they are yielded.
    fn add_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for item in items {
            self.add(item);
        }
    }
}
