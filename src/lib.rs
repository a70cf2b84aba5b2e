//! This crate exposes a Red-Black tree: an ordered container whose ordering comes
//! entirely from a caller-supplied comparator.
//!
//! ## Red-Black Tree
//!
//! A Red-Black tree is a Binary Search Tree where every `Node` carries one extra
//! bit, its color. Like any BST, for every `Node` all the `Node`s in its left
//! subtree compare less than its own value and all the `Node`s in its right
//! subtree compare greater. On top of that the colors must satisfy:
//!
//! 1. The root is black.
//! 2. No red `Node` has a red child.
//! 3. Every path from a `Node` down to a missing child passes through the same
//!    number of black `Node`s.
//!
//! > Missing children (the "NIL leaves") count as black.
//!
//! Together these limit the longest root-to-leaf path to twice the shortest, so
//! the height of a tree holding `N` values never exceeds `2 * lg(N + 1)` and
//! searching stays `O(lg N)` even for sorted input.
//!
//! # Examples
//!
//! ```
//! use rbtree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert_by(|a: &i32, b: &i32| a.cmp(b), [7, 18, 3, 10, 22, 8, 11, 26]);
//!
//! assert_eq!(tree.len(), 8);
//! assert_eq!(tree.root(), Some(&7));
//! assert!(tree.is_valid());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod queue;
pub mod rbtree;

pub use crate::queue::{EmptyError, Queue};
pub use crate::rbtree::Tree;

#[cfg(test)]
mod test;
