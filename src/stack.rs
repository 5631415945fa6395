//! A singly linked LIFO stack. The tree's lazy iterator keeps its pending nodes in one of these.
//!
//! # Examples
//!
//! ```
//! use linkedbst::LinkedStack;
//!
//! let mut stack = LinkedStack::new();
//! stack.push(1);
//! stack.push(2);
//!
//! assert_eq!(stack.len(), 2);
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.pop(), Some(1));
//!
//! // Popping an empty stack gives nothing back.
//! assert_eq!(stack.pop(), None);
//! ```

/// A stack built from a chain of boxed frames. Only the top frame is ever touched so `push` and
/// `pop` are `O(1)`.
pub struct LinkedStack<T> {
    top: Option<Box<Frame<T>>>,
    len: usize,
}

struct Frame<T> {
    item: T,
    below: Option<Box<Frame<T>>>,
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> LinkedStack<T> {
    /// Generates a new, empty `LinkedStack`.
    pub fn new() -> Self {
        Self { top: None, len: 0 }
    }

    /// Puts `item` on top of the stack.
    pub fn push(&mut self, item: T) {
        let below = self.top.take();
        self.top = Some(Box::new(Frame { item, below }));
        self.len += 1;
    }

    /// Removes and returns the item on top of the stack, or `None` if the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.top.take().map(|frame| {
            let Frame { item, below } = *frame;
            self.top = below;
            self.len -= 1;
            item
        })
    }

    /// How many items are on the stack.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Drops every item on the stack. Frames are unlinked one at a time so a tall stack can't
    /// overflow the call stack the way the default recursive `Box` drop would.
    pub fn clear(&mut self) {
        let mut top = self.top.take();
        while let Some(mut frame) = top {
            top = frame.below.take();
        }
        self.len = 0;
    }
}
