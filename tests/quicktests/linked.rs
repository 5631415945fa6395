use linkedbst::{Collection, Error, Tree};

use std::collections::BTreeMap;

use crate::Op;

/// Applies a set of operations to a tree and to a map of value counts.
/// This way we can ensure that after a random smattering of adds
/// and removes we hold the same multiset of values.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, counts: &mut BTreeMap<T, usize>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(x.clone());
                *counts.entry(x.clone()).or_insert(0) += 1;
            }
            Op::Remove(x) => match counts.get_mut(x) {
                Some(count) => {
                    assert_eq!(bst.remove(x).as_ref(), Ok(x));
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(x);
                    }
                }
                None => assert_eq!(bst.remove(x), Err(Error::ItemNotFound)),
            },
            Op::Replace(x) => {
                let replaced = bst.replace(x, x.clone());
                assert_eq!(replaced, counts.contains_key(x).then(|| x.clone()));
            }
            Op::Rebalance => bst.rebalance(),
        }
    }
}

/// The values the counts describe, in ascending order.
fn expand<T: Clone>(counts: &BTreeMap<T, usize>) -> Vec<T> {
    counts
        .iter()
        .flat_map(|(x, n)| std::iter::repeat(x.clone()).take(*n))
        .collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected = expand(&counts);

    tree.size() == expected.len() && tree.inorder().cloned().eq(expected.into_iter())
}

#[quickcheck]
fn fuzz_multiple_operations_string(ops: Vec<Op<String>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected = expand(&counts);

    tree.len() == expected.len() && tree.inorder().cloned().eq(expected.into_iter())
}

#[quickcheck]
fn replace_overwrites_in_place(xs: Vec<i8>, target: i8, bump: bool) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let shape_before = tree.preorder().copied().collect::<Vec<_>>();
    // Swapping in an equal value keeps the order; a different one is only checked for position.
    let new_value = if bump { target.wrapping_add(1) } else { target };

    let replaced = tree.replace(&target, new_value);
    let shape_after = tree.preorder().copied().collect::<Vec<_>>();

    match shape_before.iter().position(|x| *x == target) {
        // The first copy met on the way down is the one found, and it is first in preorder.
        Some(pos) => {
            let mut expected = shape_before.clone();
            expected[pos] = new_value;
            replaced == Some(target) && shape_after == expected
        }
        None => replaced.is_none() && shape_after == shape_before,
    }
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let inorder = tree.inorder().copied().collect::<Vec<_>>();

    inorder.windows(2).all(|w| w[0] <= w[1]) && inorder.len() == xs.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x) && tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut still_present = xs;
    for remove in &removes {
        let removed = tree.remove(remove);
        match still_present.iter().position(|x| x == remove) {
            Some(pos) => {
                still_present.swap_remove(pos);
                if removed != Ok(*remove) {
                    return false;
                }
            }
            None => {
                if removed != Err(Error::ItemNotFound) {
                    return false;
                }
            }
        }
    }

    still_present.sort_unstable();
    tree.len() == still_present.len() && tree.inorder().copied().eq(still_present.into_iter())
}

#[quickcheck]
fn queries_are_pure(xs: Vec<i8>, probe: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let before = tree.preorder().copied().collect::<Vec<_>>();

    let _ = tree.find(&probe);
    let _ = tree.height();
    let _ = tree.is_balanced();
    let _ = tree.range_find(&probe, &i8::MAX);
    let _ = tree.successor(&probe);
    let _ = tree.predecessor(&probe);

    tree.len() == xs.len() && tree.preorder().copied().eq(before.into_iter())
}

#[quickcheck]
fn rebalance_round_trip(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before = tree.inorder().copied().collect::<Vec<_>>();
    let height_before = tree.height();

    tree.rebalance();

    tree.height() <= height_before
        && tree.len() == xs.len()
        && tree.inorder().copied().eq(before.into_iter())
}

#[quickcheck]
fn lazy_iter_is_preorder(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    tree.iter().eq(tree.preorder()) && (&tree).into_iter().count() == tree.len()
}
