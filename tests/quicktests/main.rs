#[macro_use]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};

mod linked;

/// The public operations a quicktest can throw at a tree.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Add the value to the tree
    Add(T),
    /// Remove one copy of the value from the tree
    Remove(T),
    /// Overwrite the value with itself
    Replace(T),
    /// Rebuild the tree from its sorted contents
    Rebalance,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3]).copied() {
            Some(0) => Op::Add(T::arbitrary(g)),
            Some(1) => Op::Remove(T::arbitrary(g)),
            Some(2) => Op::Replace(T::arbitrary(g)),
            _ => Op::Rebalance,
        }
    }
}
