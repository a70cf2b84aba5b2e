use rbtree::Tree;

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set, checking after each one that they agree.
fn do_ops<E>(ops: &[Op<E>], tree: &mut Tree<E>, set: &mut BTreeSet<E>) -> bool
where
    E: Ord + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(x) => tree.insert(x.clone()) == set.insert(x.clone()) && tree.is_valid(),
        Op::Find(x) => tree.search(x) == set.get(x),
    })
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set) && tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    tree.insert_by(i8::cmp, xs.iter().copied());

    xs.iter().all(|x| tree.search_by(i8::cmp, x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none())
}

#[quickcheck]
fn in_order_is_strictly_increasing(xs: Vec<i32>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let values: Vec<_> = tree.iter().collect();

    values.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn valid_after_each_insert(xs: Vec<u16>) -> bool {
    let mut tree = Tree::new();
    xs.into_iter().all(|x| {
        tree.insert(x);
        tree.is_valid()
    })
}

#[quickcheck]
fn height_bound(xs: Vec<u16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    tree.height() as f64 <= 2.0 * ((tree.len() + 1) as f64).log2()
}

#[quickcheck]
fn duplicates_leave_size_unchanged(xs: Vec<u8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let len = tree.len();
    tree.insert_by(u8::cmp, xs);

    tree.len() == len
}

#[quickcheck]
fn comparator_decides_equality(xs: Vec<(u8, u8)>) -> bool {
    // Only the first field matters so the first pair with each key wins.
    let by_first = |a: &(u8, u8), b: &(u8, u8)| -> Ordering { a.0.cmp(&b.0) };
    let mut tree = Tree::new();
    tree.insert_by(by_first, xs.iter().copied());

    let mut firsts = Vec::new();
    for x in &xs {
        if !firsts.iter().any(|f: &(u8, u8)| f.0 == x.0) {
            firsts.push(*x);
        }
    }

    tree.len() == firsts.len()
        && firsts
            .iter()
            .all(|f| tree.search_by(by_first, &(f.0, f.1.wrapping_add(1))) == Some(f))
}

#[test]
fn sorted_thousand_is_shallow() {
    for values in [(1..=1000).collect::<Vec<i32>>(), (1..=1000).rev().collect()] {
        let mut tree = Tree::new();
        for x in values {
            tree.insert_by(i32::cmp, [x]);
            assert!(tree.is_valid());
            assert!(tree.height() as f64 <= 2.0 * ((tree.len() + 1) as f64).log2());
        }

        assert_eq!(tree.len(), 1000);
        assert!(tree.height() as f64 <= 2.0 * 1001f64.log2());
    }
}

#[test]
fn empty_tree_search() {
    let tree: Tree<i32> = Tree::new();

    assert_eq!(tree.search_by(i32::cmp, &0), None);
    assert_eq!(tree.search_by(i32::cmp, &i32::MAX), None);
    assert!(tree.is_empty());
}
