//! A FIFO queue. The tree only needs this for level-order walks while checking its own
//! invariants, but it's a perfectly usable queue on its own.
//!
//! # Examples
//!
//! ```
//! use rbtree::Queue;
//!
//! let mut queue = Queue::new();
//! queue.enqueue(1).enqueue(2);
//!
//! assert_eq!(queue.peek(), Ok(&1));
//! assert_eq!(queue.dequeue(), Ok(1));
//! assert_eq!(queue.dequeue(), Ok(2));
//!
//! // Reading from an empty queue is an error, not a panic.
//! assert!(queue.dequeue().is_err());
//! ```

use std::collections::{vec_deque, VecDeque};
use std::error::Error;
use std::fmt;

/// Returned when reading from (or removing the front of) an empty [`Queue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is empty")
    }
}

impl Error for EmptyError {}

/// A first-in, first-out queue.
#[derive(Clone, Debug)]
pub struct Queue<E> {
    data: VecDeque<E>,
}

impl<E> Default for Queue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Queue<E> {
    /// Generates a new, empty `Queue`.
    pub fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    /// Pushes `e` onto the back of the queue. Returns the queue so calls can be chained.
    pub fn enqueue(&mut self, e: E) -> &mut Self {
        self.data.push_back(e);
        self
    }

    /// Removes and returns the front of the queue.
    ///
    /// # Errors
    ///
    /// [`EmptyError`] if there is nothing to remove.
    pub fn dequeue(&mut self) -> Result<E, EmptyError> {
        self.data.pop_front().ok_or(EmptyError)
    }

    /// Borrows the front of the queue without removing it.
    ///
    /// # Errors
    ///
    /// [`EmptyError`] if the queue is empty.
    pub fn peek(&self) -> Result<&E, EmptyError> {
        self.data.front().ok_or(EmptyError)
    }

    /// The number of elements waiting in the queue.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the queue has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates from the front of the queue to the back.
    pub fn iter(&self) -> vec_deque::Iter<'_, E> {
        self.data.iter()
    }
}

impl<E> FromIterator<E> for Queue<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<'a, E> IntoIterator for &'a Queue<E> {
    type Item = &'a E;
    type IntoIter = vec_deque::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
