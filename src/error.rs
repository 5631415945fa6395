//! Errors raised by mutating tree operations.

use thiserror::Error;

/// The ways a [`Tree`][crate::Tree] operation can fail. Queries never fail, they report a missing
/// value with `None` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// [`Tree::remove`][crate::Tree::remove] was asked for a value the tree doesn't hold. The tree
    /// is left untouched.
    #[error("item not in tree")]
    ItemNotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
