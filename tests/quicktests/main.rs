//! Property tests against the public API, using `std`'s collections as the model.

mod queue;
mod rbtree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<E> {
    /// Insert the value into the tree.
    Insert(E),
    /// Look the value up in the tree.
    Find(E),
}

impl<E> Arbitrary for Op<E>
where
    E: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(E::arbitrary(g)),
            1 => Op::Find(E::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
