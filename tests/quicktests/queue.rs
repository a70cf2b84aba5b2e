use rbtree::{EmptyError, Queue};

use std::collections::VecDeque;

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

/// An enum for the various kinds of "things" to do to
/// a queue in a quicktest.
#[derive(Copy, Clone, Debug)]
enum QueueOp<E> {
    /// Push the value onto the back of the queue.
    Enqueue(E),
    /// Take the front of the queue, if there is one.
    Dequeue,
}

impl<E> Arbitrary for QueueOp<E>
where
    E: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => QueueOp::Enqueue(E::arbitrary(g)),
            1 => QueueOp::Dequeue,
            _ => unreachable!(),
        }
    }
}

#[quickcheck]
fn matches_vecdeque(ops: Vec<QueueOp<i8>>) -> bool {
    let mut queue = Queue::new();
    let mut model = VecDeque::new();

    ops.into_iter().all(|op| match op {
        QueueOp::Enqueue(x) => {
            queue.enqueue(x);
            model.push_back(x);
            queue.len() == model.len()
        }
        QueueOp::Dequeue => queue.dequeue().ok() == model.pop_front(),
    }) && queue.iter().eq(model.iter())
}

#[test]
fn drained_queue_errors() {
    let mut queue: Queue<_> = (0..3).collect();
    while queue.dequeue().is_ok() {}

    assert!(queue.is_empty());
    assert_eq!(queue.dequeue(), Err(EmptyError));
    assert_eq!(queue.peek(), Err(EmptyError));
}
